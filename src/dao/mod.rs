/// Match persistence contract and backends.
pub mod match_store;
/// Canonical match entities shared across layers.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
