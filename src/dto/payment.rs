use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::validate_payment_intent_id;

/// Request to confirm that a payment intent has been settled.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    /// Provider-issued payment-intent identifier.
    pub payment_intent_id: String,
}

impl Validate for ConfirmPaymentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_payment_intent_id(&self.payment_intent_id) {
            errors.add("payment_intent_id", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Answer returned when a payment intent was confirmed.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentConfirmation {
    /// Always true; unconfirmed payments surface as errors instead.
    pub success: bool,
}

impl PaymentConfirmation {
    /// A confirmed payment.
    pub fn confirmed() -> Self {
        Self { success: true }
    }
}
