use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the pool scoring backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::matches::create_match,
        crate::routes::matches::list_matches,
        crate::routes::matches::get_match,
        crate::routes::matches::list_matches_by_player,
        crate::routes::matches::delete_match,
        crate::routes::payment::confirm_payment,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::matches::MatchPayload,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::PlayerInfoSummary,
            crate::dto::matches::PlayerStatsSummary,
            crate::dto::matches::TurnSummary,
            crate::dto::payment::ConfirmPaymentRequest,
            crate::dto::payment::PaymentConfirmation,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "matches", description = "Match ingestion and retrieval"),
        (name = "payment", description = "Payment confirmation"),
    )
)]
pub struct ApiDoc;
