use std::sync::Arc;

use nyaa_addon_core::{Config, Manifest, SanitizedConfig, StreamHandler};

/// Shared application state
pub struct AppState {
    config: Config,
    manifest: Manifest,
    handler: Arc<StreamHandler>,
}

impl AppState {
    pub fn new(config: Config, handler: Arc<StreamHandler>) -> Self {
        Self {
            config,
            manifest: Manifest::default(),
            handler,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn handler(&self) -> &Arc<StreamHandler> {
        &self.handler
    }
}
