//! Engine loader for initializing the configured backend

use super::solr::SolrEngine;
use super::traits::Engine;
use crate::config::EngineConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Loader for creating engines from configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Create the engine named in `config`, pointed at `endpoint`
    pub fn create(config: &EngineConfig, endpoint: &str) -> Result<Arc<dyn Engine>> {
        let mut engine: Box<dyn Engine> = match config.engine.as_str() {
            "solr" => Box::new(SolrEngine::new(endpoint)),
            other => {
                return Err(anyhow::anyhow!("Unknown engine type: {}", other));
            }
        };

        engine.init(config)?;
        engine.validate(config)?;

        info!("Loaded engine: {} ({})", engine.name(), endpoint);
        Ok(Arc::from(engine))
    }
}
