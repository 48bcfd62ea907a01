//! Centralized handle to backend collaborators.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::PlatformClient;
use crate::config::AppConfig;
use crate::core::draft::FileDraftStore;

use super::events::AppEvent;

/// Created once at startup, then passed by reference to views that need
/// backend access. The API client is cheap to clone into spawned tasks.
pub struct Services {
    pub api: PlatformClient,
    pub config: AppConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize all services from config.
    ///
    /// Failures here are fatal — the TUI cannot run without an API client.
    pub fn init(
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> anyhow::Result<Self> {
        let api = PlatformClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?;
        log::info!(
            "services initialized, api base {}, data dir {}",
            config.api.base_url,
            config.data_dir().display()
        );
        Ok(Self {
            api,
            config,
            event_tx,
        })
    }

    /// Draft storage rooted in the configured data directory.
    pub fn draft_store(&self) -> FileDraftStore {
        FileDraftStore::new(self.config.data_dir().join("drafts"))
    }
}
