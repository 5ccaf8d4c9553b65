//! HTTP-backed implementations of the auth gate and payment oracle.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{AuthError, AuthGate, Identity};
use super::payment::{PaymentError, PaymentOracle};

/// Intent status the provider reports for a completed payment.
const CONFIRMED_STATUS: &str = "succeeded";

/// Auth gate speaking to the external identity service over HTTP.
#[derive(Clone)]
pub struct HttpAuthGate {
    client: Client,
    base_url: Arc<str>,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(rename = "userId")]
    user_id: String,
}

impl HttpAuthGate {
    /// Build a gate pointed at the identity service base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    async fn verify(&self, bearer_token: String) -> Result<Identity, AuthError> {
        let url = format!("{}/verify", self.base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&bearer_token)
            .send()
            .await
            .map_err(|err| AuthError::GateUnreachable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: VerifyResponse = response
                .json()
                .await
                .map_err(|err| AuthError::GateUnreachable(err.to_string()))?;
            Ok(Identity {
                user_id: body.user_id,
            })
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(AuthError::InvalidToken("credential rejected".into()))
        } else {
            Err(AuthError::GateUnreachable(format!(
                "unexpected status {status}"
            )))
        }
    }
}

impl AuthGate for HttpAuthGate {
    fn authenticate(&self, bearer_token: String) -> BoxFuture<'static, Result<Identity, AuthError>> {
        let gate = self.clone();
        Box::pin(async move { gate.verify(bearer_token).await })
    }
}

/// Payment oracle speaking to the payment provider over HTTP.
#[derive(Clone)]
pub struct HttpPaymentOracle {
    client: Client,
    base_url: Arc<str>,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    status: String,
}

impl HttpPaymentOracle {
    /// Build an oracle pointed at the payment provider base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    async fn retrieve(&self, payment_intent_id: String) -> Result<bool, PaymentError> {
        let url = format!("{}/payment-intents/{}", self.base_url, payment_intent_id);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| PaymentError::ProviderUnreachable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: IntentResponse = response
                .json()
                .await
                .map_err(|err| PaymentError::MalformedResponse(err.to_string()))?;
            Ok(body.status == CONFIRMED_STATUS)
        } else if status == StatusCode::NOT_FOUND {
            // An unknown intent is simply not confirmed.
            Ok(false)
        } else {
            Err(PaymentError::ProviderUnreachable(format!(
                "unexpected status {status}"
            )))
        }
    }
}

impl PaymentOracle for HttpPaymentOracle {
    fn confirm(&self, payment_intent_id: String) -> BoxFuture<'static, Result<bool, PaymentError>> {
        let oracle = self.clone();
        Box::pin(async move { oracle.retrieve(payment_intent_id).await })
    }
}
