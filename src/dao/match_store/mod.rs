#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{MatchRecord, StoredMatch};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Outcome of an owner-checked delete.
///
/// `NotFound` and `NotOwner` are kept distinct so the service layer can
/// answer 404 and 403 separately; collapsing them is a product decision
/// that belongs above the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The match existed, belonged to the requester, and was removed.
    Deleted,
    /// No match with the given id exists.
    NotFound,
    /// The match exists but belongs to another account; nothing was removed.
    NotOwner,
}

/// Abstraction over the persistence layer for match records.
///
/// Every write is a single-document operation; the store's own write
/// atomicity is relied upon and never reimplemented above it.
pub trait MatchStore: Send + Sync {
    /// Persist an assembled match, generating its id and audit timestamps.
    fn create_match(&self, record: MatchRecord) -> BoxFuture<'static, StorageResult<StoredMatch>>;
    /// Fetch one match by id.
    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<StoredMatch>>>;
    /// All matches owned by the account, newest `match_date` first.
    fn list_by_owner(
        &self,
        user_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<StoredMatch>>>;
    /// All matches where either player carries the given name, newest first.
    fn list_by_player(&self, name: String) -> BoxFuture<'static, StorageResult<Vec<StoredMatch>>>;
    /// Delete a match if and only if it belongs to `requesting_user`.
    fn delete_match(
        &self,
        id: Uuid,
        requesting_user: String,
    ) -> BoxFuture<'static, StorageResult<DeleteOutcome>>;
    /// Ping the backend.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the backend connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
