//! Application state

use std::sync::Arc;

use crate::config::Config;
use crate::db::{OrderStore, PgStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order / product storage
    pub store: Arc<dyn OrderStore>,
}

impl AppState {
    /// Connect to PostgreSQL and run migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store = PgStore::connect(config).await?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Build state over an already constructed store
    pub fn with_store(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }
}
