//! Pool scoring backend entrypoint wiring REST, the auth gate, the payment
//! oracle, and the MongoDB match store.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod dao;
mod dto;
mod error;
mod ingest;
mod routes;
mod services;
mod state;

use auth::http::{HttpAuthGate, HttpPaymentOracle};
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();

    let auth_gate = Arc::new(HttpAuthGate::new(&config.auth_gate_url));
    let payment_oracle = Arc::new(HttpPaymentOracle::new(&config.payment_provider_url));
    let app_state = AppState::new(auth_gate, payment_oracle);

    spawn_storage_supervisor(app_state.clone(), &config);

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Keep a MongoDB match store installed in the background; the application
/// serves in degraded mode until the first connection succeeds.
#[cfg(feature = "mongo-store")]
fn spawn_storage_supervisor(state: state::SharedState, config: &AppConfig) {
    use dao::match_store::MatchStore;
    use dao::match_store::mongodb::{MongoConfig, MongoMatchStore};
    use dao::storage::StorageError;

    let uri = config.mongo_uri.clone();
    let db_name = config.mongo_db.clone();

    tokio::spawn(services::storage_supervisor::run(state, move || {
        let uri = uri.clone();
        let db_name = db_name.clone();
        async move {
            let mongo_config = MongoConfig::from_uri(&uri, db_name.as_deref())
                .await
                .map_err(StorageError::from)?;
            let store = MongoMatchStore::connect(mongo_config)
                .await
                .map_err(StorageError::from)?;
            Ok(Arc::new(store) as Arc<dyn MatchStore>)
        }
    }));
}

#[cfg(not(feature = "mongo-store"))]
fn spawn_storage_supervisor(_state: state::SharedState, _config: &AppConfig) {
    tracing::warn!("built without a storage backend; serving in degraded mode");
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
