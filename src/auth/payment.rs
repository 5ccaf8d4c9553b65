//! Payment confirmation oracle contract.

use futures::future::BoxFuture;
use thiserror::Error;

/// Errors raised while consulting the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider could not be reached.
    #[error("payment provider unreachable: {0}")]
    ProviderUnreachable(String),
    /// The provider answered with a shape we do not understand.
    #[error("malformed payment provider response: {0}")]
    MalformedResponse(String),
}

/// Boolean oracle keyed by payment-intent identifier.
///
/// Account creation is gated on a confirmed payment; the oracle answers
/// only "confirmed or not", never amounts or customer data.
pub trait PaymentOracle: Send + Sync {
    /// Whether the given payment intent has been confirmed by the provider.
    fn confirm(&self, payment_intent_id: String) -> BoxFuture<'static, Result<bool, PaymentError>>;
}
