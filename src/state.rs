use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::inference::{ChatProvider, NemotronClient};
use crate::store::{open_store, CanvasStore};

/// Shared per-request handles: the record store and the chat provider,
/// both behind their capability traits so tests can substitute either.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CanvasStore>,
    pub chat: Arc<dyn ChatProvider>,
}

impl AppState {
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = open_store(&config.store).await?;
        let chat: Arc<dyn ChatProvider> = Arc::new(NemotronClient::new(&config.inference)?);
        Ok(Self { store, chat })
    }
}
