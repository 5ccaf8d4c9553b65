use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    auth::{Identity, require_identity},
    dto::matches::{MatchPayload, MatchSummary},
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Match ingestion and retrieval endpoints, all behind the auth gate.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/matches", post(create_match).get(list_matches))
        .route("/matches/{id}", get(get_match).delete(delete_match))
        .route("/matches/player/{name}", get(list_matches_by_player))
        .route_layer(middleware::from_fn_with_state(state, require_identity))
}

/// Ingest a match submission and persist the canonical record.
#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    request_body = MatchPayload,
    responses(
        (status = 200, description = "Match recorded", body = MatchSummary),
        (status = 400, description = "Payload failed validation"),
        (status = 401, description = "Missing or invalid credential"),
    )
)]
pub async fn create_match(
    State(state): State<SharedState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<MatchPayload>,
) -> Result<Json<MatchSummary>, AppError> {
    let summary = match_service::ingest_match(&state, identity, payload).await?;
    Ok(Json(summary))
}

/// List the caller's matches, newest first.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    responses(
        (status = 200, description = "Matches owned by the caller", body = [MatchSummary]),
        (status = 401, description = "Missing or invalid credential"),
    )
)]
pub async fn list_matches(
    State(state): State<SharedState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = match_service::list_owned(&state, identity).await?;
    Ok(Json(matches))
}

/// Fetch a single match by its identifier.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match", body = MatchSummary),
        (status = 404, description = "No match with this id"),
    )
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchSummary>, AppError> {
    let summary = match_service::get_match(&state, id).await?;
    Ok(Json(summary))
}

/// List matches in which the named player took part, newest first.
#[utoipa::path(
    get,
    path = "/matches/player/{name}",
    tag = "matches",
    params(("name" = String, Path, description = "Player name to search for")),
    responses(
        (status = 200, description = "Matches featuring the player", body = [MatchSummary]),
        (status = 401, description = "Missing or invalid credential"),
    )
)]
pub async fn list_matches_by_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = match_service::list_by_player(&state, name).await?;
    Ok(Json(matches))
}

/// Delete a match owned by the caller.
#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match to delete")),
    responses(
        (status = 204, description = "Match deleted"),
        (status = 403, description = "Match belongs to another account"),
        (status = 404, description = "No match with this id"),
    )
)]
pub async fn delete_match(
    State(state): State<SharedState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match_service::delete_match(&state, identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
