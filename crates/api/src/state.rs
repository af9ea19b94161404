use std::sync::Arc;

use fakenodo_core::registry::DepositionRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// In-memory deposition store.
    pub registry: Arc<DepositionRegistry>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with a fresh, empty registry configured from `config`.
    pub fn new(config: ServerConfig) -> Self {
        let registry = DepositionRegistry::with_doi_prefix(config.doi_prefix.clone());
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}
