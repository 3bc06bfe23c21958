//! Shared application state for the web server.

use crate::config::Config;
use glossa_catalog::Catalog;
use glossa_db::Database;
use std::sync::Arc;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub db: Arc<Database>,
    pub catalog: Catalog,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        let catalog = Catalog::new(db.clone());
        Self { db, catalog, config }
    }

    /// Open the configured database, create the schema and build the state.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let db = Database::open(&config.database.url, config.database.max_connections).await?;
        db.initialize().await?;
        tracing::info!(url = %config.database.url, "database ready");
        Ok(Self::new(Arc::new(db), config))
    }
}

pub type SharedState = Arc<AppState>;
