use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::payment::{ConfirmPaymentRequest, PaymentConfirmation},
    error::AppError,
    services::payment_service,
    state::SharedState,
};

/// Payment confirmation endpoint consumed by the registration flow.
pub fn router() -> Router<SharedState> {
    Router::new().route("/payment/confirm-payment", post(confirm_payment))
}

/// Confirm that a payment intent has been settled by the provider.
#[utoipa::path(
    post,
    path = "/payment/confirm-payment",
    tag = "payment",
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 200, description = "Payment confirmed", body = PaymentConfirmation),
        (status = 400, description = "Malformed payment intent id"),
        (status = 401, description = "Payment not confirmed"),
    )
)]
pub async fn confirm_payment(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<ConfirmPaymentRequest>>,
) -> Result<Json<PaymentConfirmation>, AppError> {
    let confirmation = payment_service::confirm_payment(&state, payload).await?;
    Ok(Json(confirmation))
}
