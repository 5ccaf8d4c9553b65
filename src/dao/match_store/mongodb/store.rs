use std::sync::Arc;
use std::time::SystemTime;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, bson::doc, options::IndexOptions};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoMatchDocument, doc_id},
};
use crate::dao::{
    match_store::{DeleteOutcome, MatchStore},
    models::{MatchRecord, StoredMatch},
    storage::StorageResult,
};

const MATCH_COLLECTION_NAME: &str = "matches";

/// MongoDB-backed implementation of [`MatchStore`].
#[derive(Clone)]
pub struct MongoMatchStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoMatchStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let collection = self.collection().await;

        // Owner listing is always sorted by match date, so index both keys
        // together.
        let owner_index = mongodb::IndexModel::builder()
            .keys(doc! {"user_id": 1, "match_date": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("owner_date_idx".to_owned()))
                    .build(),
            )
            .build();

        collection
            .create_index(owner_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MATCH_COLLECTION_NAME,
                index: "user_id,match_date",
                source,
            })?;

        // Player lookups filter on either name path, so each gets its own
        // index.
        for (index_name, key) in [
            ("player1_name_idx", "player1.name"),
            ("player2_name_idx", "player2.name"),
        ] {
            let index = mongodb::IndexModel::builder()
                .keys(doc! {key: 1})
                .options(
                    IndexOptions::builder()
                        .name(Some(index_name.to_owned()))
                        .build(),
                )
                .build();

            collection
                .create_index(index)
                .await
                .map_err(|source| MongoDaoError::EnsureIndex {
                    collection: MATCH_COLLECTION_NAME,
                    index: "player name",
                    source,
                })?;
        }

        Ok(())
    }

    async fn collection(&self) -> Collection<MongoMatchDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoMatchDocument>(MATCH_COLLECTION_NAME)
    }

    async fn create_match(&self, record: MatchRecord) -> MongoResult<StoredMatch> {
        let id = Uuid::new_v4();
        let now = SystemTime::now();
        let stored = StoredMatch {
            id,
            record,
            created_at: now,
            updated_at: now,
        };

        let document: MongoMatchDocument = stored.clone().into();
        let collection = self.collection().await;
        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveMatch { id, source })?;

        Ok(stored)
    }

    async fn find_match(&self, id: Uuid) -> MongoResult<Option<StoredMatch>> {
        let collection = self.collection().await;

        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadMatch { id, source })?;

        Ok(document.map(Into::into))
    }

    async fn list_by_owner(&self, user_id: String) -> MongoResult<Vec<StoredMatch>> {
        let collection = self.collection().await;

        let documents: Vec<MongoMatchDocument> = collection
            .find(doc! {"user_id": &user_id})
            .sort(doc! {"match_date": -1})
            .await
            .map_err(|source| MongoDaoError::ListByOwner { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListByOwner { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn list_by_player(&self, name: String) -> MongoResult<Vec<StoredMatch>> {
        let collection = self.collection().await;

        let filter = doc! {"$or": [
            {"player1.name": &name},
            {"player2.name": &name},
        ]};

        let documents: Vec<MongoMatchDocument> = collection
            .find(filter)
            .sort(doc! {"match_date": -1})
            .await
            .map_err(|source| MongoDaoError::ListByPlayer {
                name: name.clone(),
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListByPlayer {
                name: name.clone(),
                source,
            })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    /// Read-then-delete: the ownership check needs the stored document, and
    /// a lost race with a concurrent delete degrades to `NotFound`.
    async fn delete_match(
        &self,
        id: Uuid,
        requesting_user: String,
    ) -> MongoResult<DeleteOutcome> {
        let collection = self.collection().await;

        let Some(document) = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadMatch { id, source })?
        else {
            return Ok(DeleteOutcome::NotFound);
        };

        if document.owner() != requesting_user {
            return Ok(DeleteOutcome::NotOwner);
        }

        let result = collection
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteMatch { id, source })?;

        if result.deleted_count > 0 {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }
}

impl MatchStore for MongoMatchStore {
    fn create_match(&self, record: MatchRecord) -> BoxFuture<'static, StorageResult<StoredMatch>> {
        let store = self.clone();
        Box::pin(async move { store.create_match(record).await.map_err(Into::into) })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<StoredMatch>>> {
        let store = self.clone();
        Box::pin(async move { store.find_match(id).await.map_err(Into::into) })
    }

    fn list_by_owner(
        &self,
        user_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<StoredMatch>>> {
        let store = self.clone();
        Box::pin(async move { store.list_by_owner(user_id).await.map_err(Into::into) })
    }

    fn list_by_player(&self, name: String) -> BoxFuture<'static, StorageResult<Vec<StoredMatch>>> {
        let store = self.clone();
        Box::pin(async move { store.list_by_player(name).await.map_err(Into::into) })
    }

    fn delete_match(
        &self,
        id: Uuid,
        requesting_user: String,
    ) -> BoxFuture<'static, StorageResult<DeleteOutcome>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_match(id, requesting_user)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
