use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn};

use quill_core::error::RepoError;

use super::schema;

/// Connection settings for the posts database, assembled from the four
/// required `PG_*` values plus pool limits.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub db_name: String,
    pub host: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Assemble the connection URL from the individual settings.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            self.username, self.password, self.host, self.db_name
        )
    }
}

/// Open the database connection and ensure the schema is in place.
///
/// A single attempt, no retry: any failure here aborts startup. The
/// schema-ensure step runs to completion before the connection is
/// handed out.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, RepoError> {
    tracing::info!(host = %config.host, db = %config.db_name, "Connecting to database");

    let opts = ConnectOptions::new(config.url())
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;

    schema::ensure(&db).await?;

    tracing::info!("Database connected (pool: {})", config.max_connections);

    Ok(db)
}
