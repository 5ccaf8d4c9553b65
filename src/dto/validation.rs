//! Validation helpers for DTOs.

use validator::ValidationError;

/// Prefix the payment provider puts on every payment-intent identifier.
const INTENT_ID_PREFIX: &str = "pi_";

/// Validates that a payment-intent id is plausible before the provider is
/// consulted: non-empty after trimming and carrying the provider prefix.
///
/// # Examples
///
/// ```ignore
/// validate_payment_intent_id("pi_3OaBcD")  // Ok
/// validate_payment_intent_id("")           // Err - empty
/// validate_payment_intent_id("ch_3OaBcD")  // Err - wrong prefix
/// ```
pub fn validate_payment_intent_id(id: &str) -> Result<(), ValidationError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("payment_intent_required");
        err.message = Some("Payment information is required".into());
        return Err(err);
    }

    if !trimmed.starts_with(INTENT_ID_PREFIX) {
        let mut err = ValidationError::new("payment_intent_format");
        err.message =
            Some(format!("Payment intent id must start with `{INTENT_ID_PREFIX}`").into());
        return Err(err);
    }

    Ok(())
}
