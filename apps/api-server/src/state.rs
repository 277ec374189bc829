//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::error::RepoError;
use quill_core::ports::PostRepository;
use quill_infra::database::{self, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state: the persistence handle captured at
/// registration time plus the body-decoding mode.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub strict_json: bool,
}

impl AppState {
    /// Connect to the database and build the state.
    ///
    /// A connection or schema failure here is fatal: the server never
    /// starts without its storage.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let db = database::connect(&config.database).await?;
        let posts = Arc::new(PostgresPostRepository::new(db));

        tracing::info!("Application state initialized");

        Ok(Self {
            posts,
            strict_json: config.strict_json,
        })
    }
}
