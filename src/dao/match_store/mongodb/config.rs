use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Database name used when the deployment does not specify one.
const DEFAULT_DATABASE: &str = "pool_scoring";

/// Parsed MongoDB connection settings.
#[derive(Clone)]
pub struct MongoConfig {
    /// Driver options parsed from the connection URI.
    pub options: ClientOptions,
    /// Name of the database holding the match collection.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse a connection URI, falling back to the default database name.
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or(DEFAULT_DATABASE).to_owned();
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name,
        })
    }
}
