use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

/// Result alias for MongoDB-backed operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Driver-level failures annotated with the operation that hit them.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI did not parse.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// The offending URI.
        uri: String,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// The client could not be built from parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// The deployment never answered the initial ping.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Number of pings sent before giving up.
        attempts: u32,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// A health-check ping failed on an established connection.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// Index creation failed.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Collection carrying the index.
        collection: &'static str,
        /// Index key description.
        index: &'static str,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// Insert of a new match failed.
    #[error("failed to save match `{id}`")]
    SaveMatch {
        /// Match primary key.
        id: Uuid,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// Lookup of a match by id failed.
    #[error("failed to load match `{id}`")]
    LoadMatch {
        /// Match primary key.
        id: Uuid,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// Owner-scoped listing failed.
    #[error("failed to list matches for owner")]
    ListByOwner {
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// Player-name listing failed.
    #[error("failed to list matches for player `{name}`")]
    ListByPlayer {
        /// Player name used as the filter.
        name: String,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
    /// Deletion of a match failed.
    #[error("failed to delete match `{id}`")]
    DeleteMatch {
        /// Match primary key.
        id: Uuid,
        /// Driver cause.
        #[source]
        source: MongoError,
    },
}
