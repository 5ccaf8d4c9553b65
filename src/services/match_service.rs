//! Business logic behind the match routes: runs the ingestion pipeline and
//! translates store outcomes into the service error taxonomy.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::Identity,
    dao::match_store::DeleteOutcome,
    dto::matches::{MatchPayload, MatchSummary},
    error::ServiceError,
    ingest::{IngestContext, assemble_match},
    state::SharedState,
};

/// Normalize and persist a submitted match on behalf of the caller.
///
/// Assembly failures abort before anything touches the store; the owning
/// `user_id` always comes from the authenticated identity.
pub async fn ingest_match(
    state: &SharedState,
    identity: Identity,
    payload: MatchPayload,
) -> Result<MatchSummary, ServiceError> {
    let store = state.require_match_store().await?;

    let ctx = IngestContext::new(identity.user_id);
    let record = assemble_match(payload, &ctx)?;
    debug!(turns = record.innings.len(), "assembled match record");

    let stored = store.create_match(record).await?;
    info!(id = %stored.id, "match recorded");
    Ok(stored.into())
}

/// All matches owned by the caller, newest first.
pub async fn list_owned(
    state: &SharedState,
    identity: Identity,
) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let matches = store.list_by_owner(identity.user_id).await?;
    Ok(matches.into_iter().map(Into::into).collect())
}

/// Fetch a single match by id.
pub async fn get_match(state: &SharedState, id: Uuid) -> Result<MatchSummary, ServiceError> {
    let store = state.require_match_store().await?;
    let Some(stored) = store.find_match(id).await? else {
        return Err(ServiceError::NotFound(format!("match `{id}` not found")));
    };
    Ok(stored.into())
}

/// All matches where either player carries the given name, newest first.
pub async fn list_by_player(
    state: &SharedState,
    name: String,
) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let matches = store.list_by_player(name).await?;
    Ok(matches.into_iter().map(Into::into).collect())
}

/// Delete a match owned by the caller.
///
/// A foreign owner gets a forbidden error, not a not-found: ownership is
/// deliberately revealed rather than masked.
pub async fn delete_match(
    state: &SharedState,
    identity: Identity,
    id: Uuid,
) -> Result<(), ServiceError> {
    let store = state.require_match_store().await?;

    match store.delete_match(id, identity.user_id).await? {
        DeleteOutcome::Deleted => {
            info!(%id, "match deleted");
            Ok(())
        }
        DeleteOutcome::NotFound => Err(ServiceError::NotFound(format!("match `{id}` not found"))),
        DeleteOutcome::NotOwner => Err(ServiceError::Forbidden(
            "match belongs to another account".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::SystemTime;

    use futures::future::BoxFuture;
    use serde_json::json;

    use crate::{
        auth::{AuthError, AuthGate, PaymentError, PaymentOracle},
        dao::{
            match_store::MatchStore,
            models::{MatchRecord, StoredMatch},
            storage::StorageResult,
        },
        state::AppState,
    };

    #[derive(Clone, Default)]
    struct MemoryMatchStore {
        matches: Arc<Mutex<Vec<StoredMatch>>>,
    }

    impl MemoryMatchStore {
        fn stored(&self) -> Vec<StoredMatch> {
            self.matches.lock().unwrap().clone()
        }
    }

    impl MatchStore for MemoryMatchStore {
        fn create_match(
            &self,
            record: MatchRecord,
        ) -> BoxFuture<'static, StorageResult<StoredMatch>> {
            let store = self.clone();
            Box::pin(async move {
                let now = SystemTime::now();
                let stored = StoredMatch {
                    id: Uuid::new_v4(),
                    record,
                    created_at: now,
                    updated_at: now,
                };
                store.matches.lock().unwrap().push(stored.clone());
                Ok(stored)
            })
        }

        fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<StoredMatch>>> {
            let store = self.clone();
            Box::pin(async move {
                Ok(store
                    .matches
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|stored| stored.id == id)
                    .cloned())
            })
        }

        fn list_by_owner(
            &self,
            user_id: String,
        ) -> BoxFuture<'static, StorageResult<Vec<StoredMatch>>> {
            let store = self.clone();
            Box::pin(async move {
                let mut matches: Vec<StoredMatch> = store
                    .matches
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|stored| stored.record.user_id == user_id)
                    .cloned()
                    .collect();
                matches.sort_by(|a, b| b.record.match_date.cmp(&a.record.match_date));
                Ok(matches)
            })
        }

        fn list_by_player(
            &self,
            name: String,
        ) -> BoxFuture<'static, StorageResult<Vec<StoredMatch>>> {
            let store = self.clone();
            Box::pin(async move {
                let mut matches: Vec<StoredMatch> = store
                    .matches
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|stored| {
                        stored.record.player1.name == name || stored.record.player2.name == name
                    })
                    .cloned()
                    .collect();
                matches.sort_by(|a, b| b.record.match_date.cmp(&a.record.match_date));
                Ok(matches)
            })
        }

        fn delete_match(
            &self,
            id: Uuid,
            requesting_user: String,
        ) -> BoxFuture<'static, StorageResult<DeleteOutcome>> {
            let store = self.clone();
            Box::pin(async move {
                let mut matches = store.matches.lock().unwrap();
                let Some(position) = matches.iter().position(|stored| stored.id == id) else {
                    return Ok(DeleteOutcome::NotFound);
                };
                if matches[position].record.user_id != requesting_user {
                    return Ok(DeleteOutcome::NotOwner);
                }
                matches.remove(position);
                Ok(DeleteOutcome::Deleted)
            })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    struct UnusedGate;

    impl AuthGate for UnusedGate {
        fn authenticate(&self, _token: String) -> BoxFuture<'static, Result<Identity, AuthError>> {
            Box::pin(async { Err(AuthError::InvalidToken("not under test".into())) })
        }
    }

    struct UnusedOracle;

    impl PaymentOracle for UnusedOracle {
        fn confirm(&self, _id: String) -> BoxFuture<'static, Result<bool, PaymentError>> {
            Box::pin(async { Ok(false) })
        }
    }

    async fn state_with_store(store: MemoryMatchStore) -> SharedState {
        let state = AppState::new(Arc::new(UnusedGate), Arc::new(UnusedOracle));
        state.set_match_store(Arc::new(store)).await;
        state
    }

    fn identity(user_id: &str) -> Identity {
        Identity {
            user_id: user_id.into(),
        }
    }

    fn payload() -> MatchPayload {
        serde_json::from_value(json!({
            "player1": {"name": "A"},
            "player2": {"name": "B"},
            "player1Score": 5,
            "player2Score": 3,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn ingest_attaches_the_caller_as_owner() {
        let store = MemoryMatchStore::default();
        let state = state_with_store(store.clone()).await;

        let summary = ingest_match(&state, identity("owner-1"), payload())
            .await
            .unwrap();

        assert_eq!(summary.user_id, "owner-1");
        assert_eq!(summary.player1_stats.score, 5);
        let stored = store.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].record.user_id, "owner-1");
    }

    #[tokio::test]
    async fn invalid_payloads_never_reach_the_store() {
        let store = MemoryMatchStore::default();
        let state = state_with_store(store.clone()).await;

        let bad: MatchPayload = serde_json::from_value(json!({"player2": {"name": "B"}})).unwrap();
        let err = ingest_match(&state, identity("owner-1"), bad)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn missing_store_surfaces_degraded_mode() {
        let state = AppState::new(Arc::new(UnusedGate), Arc::new(UnusedOracle));
        let err = ingest_match(&state, identity("owner-1"), payload())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Degraded));
    }

    #[tokio::test]
    async fn owners_can_delete_their_own_match() {
        let store = MemoryMatchStore::default();
        let state = state_with_store(store.clone()).await;

        let summary = ingest_match(&state, identity("owner-1"), payload())
            .await
            .unwrap();
        delete_match(&state, identity("owner-1"), summary.id)
            .await
            .unwrap();

        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn foreign_owners_get_forbidden_and_the_record_survives() {
        let store = MemoryMatchStore::default();
        let state = state_with_store(store.clone()).await;

        let summary = ingest_match(&state, identity("owner-1"), payload())
            .await
            .unwrap();
        let err = delete_match(&state, identity("intruder"), summary.id)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(store.stored().len(), 1);
    }

    #[tokio::test]
    async fn deleting_an_unknown_match_is_not_found() {
        let state = state_with_store(MemoryMatchStore::default()).await;
        let err = delete_match(&state, identity("owner-1"), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn listings_are_scoped_to_the_caller() {
        let store = MemoryMatchStore::default();
        let state = state_with_store(store.clone()).await;

        ingest_match(&state, identity("owner-1"), payload())
            .await
            .unwrap();
        ingest_match(&state, identity("owner-2"), payload())
            .await
            .unwrap();

        let owned = list_owned(&state, identity("owner-1")).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].user_id, "owner-1");

        let by_player = list_by_player(&state, "B".into()).await.unwrap();
        assert_eq!(by_player.len(), 2);
        let by_player = list_by_player(&state, "nobody".into()).await.unwrap();
        assert!(by_player.is_empty());
    }
}
