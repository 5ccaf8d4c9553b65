//! Authentication gate and payment oracle collaborator contracts.
//!
//! Token issuance, credential storage, and account registration live in an
//! external identity service; this crate only verifies bearer credentials
//! through the [`AuthGate`] and asks the [`PaymentOracle`] whether a
//! payment intent was confirmed.

pub mod http;
pub mod payment;

pub use payment::{PaymentError, PaymentOracle};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use futures::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

use crate::{error::AppError, state::SharedState};

/// Stable identity attached to every ingested match.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    /// Account identifier as issued by the external identity service.
    pub user_id: String,
}

/// Errors raised while verifying a bearer credential.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer` header was supplied.
    #[error("missing bearer credential")]
    MissingCredentials,
    /// The gate rejected the credential.
    #[error("invalid credential: {0}")]
    InvalidToken(String),
    /// The gate itself could not be consulted.
    #[error("auth gate unreachable: {0}")]
    GateUnreachable(String),
}

/// Verifies bearer credentials against the external identity service.
pub trait AuthGate: Send + Sync {
    /// Resolve a bearer token to the account it belongs to.
    fn authenticate(&self, bearer_token: String) -> BoxFuture<'static, Result<Identity, AuthError>>;
}

/// Route-layer middleware enforcing an authenticated caller.
///
/// On success the resolved [`Identity`] is stored in the request extensions
/// for handlers to pick up via `Extension<Identity>`.
pub async fn require_identity(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)
        .ok_or_else(|| AppError::Unauthorized("missing `Authorization: Bearer` header".into()))?;

    let identity = state
        .auth_gate()
        .authenticate(token)
        .await
        .map_err(|err| match err {
            AuthError::GateUnreachable(message) => AppError::ServiceUnavailable(message),
            other => AppError::Unauthorized(other.to_string()),
        })?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_header(value: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/matches");
        if let Some(value) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn bearer_token_is_extracted() {
        let req = request_with_header(Some("Bearer abc123"));
        assert_eq!(bearer_token(&req).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_malformed_headers_yield_none() {
        assert!(bearer_token(&request_with_header(None)).is_none());
        assert!(bearer_token(&request_with_header(Some("Basic abc"))).is_none());
        assert!(bearer_token(&request_with_header(Some("Bearer "))).is_none());
    }
}
