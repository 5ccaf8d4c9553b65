//! Application-level configuration gathered from the environment.

use std::env;

use tracing::info;

/// Default listen port when neither `PORT` nor `SERVER_PORT` is set.
const DEFAULT_PORT: u16 = 8000;
/// Default MongoDB deployment for local development.
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// Default identity service for local development.
const DEFAULT_AUTH_GATE_URL: &str = "http://localhost:8081";
/// Default payment provider facade for local development.
const DEFAULT_PAYMENT_PROVIDER_URL: &str = "http://localhost:8082";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// MongoDB connection URI.
    pub mongo_uri: String,
    /// MongoDB database name override, when set.
    pub mongo_db: Option<String>,
    /// Base URL of the external identity service.
    pub auth_gate_url: String,
    /// Base URL of the payment provider facade.
    pub payment_provider_url: String,
}

impl AppConfig {
    /// Read the configuration from environment variables, falling back to
    /// local-development defaults, and log what was resolved.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.into());
        let mongo_db = env::var("MONGO_DB").ok().filter(|value| !value.is_empty());

        let auth_gate_url =
            env::var("AUTH_GATE_URL").unwrap_or_else(|_| DEFAULT_AUTH_GATE_URL.into());
        let payment_provider_url = env::var("PAYMENT_PROVIDER_URL")
            .unwrap_or_else(|_| DEFAULT_PAYMENT_PROVIDER_URL.into());

        let config = Self {
            port,
            mongo_uri,
            mongo_db,
            auth_gate_url,
            payment_provider_url,
        };

        info!(
            port = config.port,
            auth_gate = %config.auth_gate_url,
            payment_provider = %config.payment_provider_url,
            "resolved runtime configuration"
        );

        config
    }
}
