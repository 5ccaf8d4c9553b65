//! Payment confirmation behind the oracle contract.

use tracing::warn;

use crate::{
    dto::payment::{ConfirmPaymentRequest, PaymentConfirmation},
    error::ServiceError,
    state::SharedState,
};

/// Ask the payment oracle whether the intent was settled.
///
/// An unreachable provider is treated as "not confirmed" rather than a
/// server error, matching the conservative stance of the registration flow;
/// the failure is logged so operators still see it.
pub async fn confirm_payment(
    state: &SharedState,
    request: ConfirmPaymentRequest,
) -> Result<PaymentConfirmation, ServiceError> {
    let confirmed = match state
        .payment_oracle()
        .confirm(request.payment_intent_id.clone())
        .await
    {
        Ok(confirmed) => confirmed,
        Err(err) => {
            warn!(error = %err, "payment oracle lookup failed; treating intent as unconfirmed");
            false
        }
    };

    if confirmed {
        Ok(PaymentConfirmation::confirmed())
    } else {
        Err(ServiceError::Unauthorized(
            "payment confirmation failed".into(),
        ))
    }
}
