//! Shared application state for the synthmetrics server.
//!
//! Builds the static inventory and the metrics engine from config once at
//! startup. Startup errors are returned, not panicked.

use std::sync::Arc;
use std::time::Duration;

use synthmetrics_core::error::Result;

use crate::config::MetricsConfig;
use crate::discovery::StaticInventory;
use crate::engine::MetricsEngine;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: MetricsConfig,
    engine: MetricsEngine,
}

impl AppState {
    pub fn new(cfg: MetricsConfig) -> Result<Self> {
        let inventory = Arc::new(StaticInventory::from_config(&cfg)?);
        let engine = MetricsEngine::new(inventory.clone(), inventory)
            .with_list_timeout(Duration::from_millis(cfg.server.list_timeout_ms));

        tracing::info!(
            resource_types = cfg.resources.len(),
            objects = cfg.objects.len(),
            "static inventory loaded"
        );

        Ok(Self::with_engine(cfg, engine))
    }

    /// Wrap an already-built engine (custom collaborators, tests).
    pub fn with_engine(cfg: MetricsConfig, engine: MetricsEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, engine }),
        }
    }

    pub fn cfg(&self) -> &MetricsConfig {
        &self.inner.cfg
    }

    pub fn engine(&self) -> &MetricsEngine {
        &self.inner.engine
    }
}
