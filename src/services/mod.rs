/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match ingestion and retrieval orchestration.
pub mod match_service;
/// Payment confirmation orchestration.
pub mod payment_service;
/// Storage persistence coordinator with reconnect backoff.
pub mod storage_supervisor;
