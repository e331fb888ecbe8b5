//! Application State
//!
//! Startup wiring: loads the configuration, opens the key-value backend,
//! builds the Gemini provider and hands both to a loaded [`Session`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::warn;

use promptdeck_core::{KeyValueStore, MemoryStore};
use promptdeck_llm::{GeminiProvider, LlmProvider, ProviderConfig};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::session::Session;
use crate::storage::{ConfigService, SqliteStore};
use crate::utils::error::AppResult;

/// Everything the command handlers need
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<ConfigService>>,
    /// Active key-value backend
    store: Arc<dyn KeyValueStore>,
    session: Session,
}

impl AppState {
    /// Open the configured SQLite store, falling back to an in-memory store
    /// when the database cannot be opened
    pub async fn from_config(config: ConfigService) -> AppResult<Self> {
        let path = config.database_path()?;
        let store: Arc<dyn KeyValueStore> = match SqliteStore::open(&path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "database unavailable, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        let provider = build_provider(config.get_config())?;
        Self::with_parts(config, store, provider).await
    }

    /// Assemble state from explicit parts
    pub async fn with_parts(
        config: ConfigService,
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn LlmProvider>,
    ) -> AppResult<Self> {
        let window = Duration::from_millis(config.get_config().undo_window_ms);
        let session = Session::new(store.clone(), provider, window);
        session.load().await?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Name of the active key-value backend
    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            return guard.is_healthy();
        }
        false
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppConfig {
        self.config.read().await.get_config().clone()
    }

    /// Update the configuration. Takes effect on the next start.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        self.config.write().await.update_config(update)
    }
}

/// Build the Gemini provider described by the configuration
pub fn build_provider(config: &AppConfig) -> AppResult<Arc<dyn LlmProvider>> {
    let provider = GeminiProvider::new(ProviderConfig {
        model: config.model.clone(),
        base_url: config.api_base_url.clone(),
        proxy: config.proxy.clone(),
    })?;
    Ok(Arc::new(provider))
}
