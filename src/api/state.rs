use std::sync::Arc;

use crate::{catalog::Catalog, config::Config, services::RecommendationEngine};

/// Shared application state
///
/// Everything inside is read-only once the server starts, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates the state from a fully loaded catalog
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            engine: Arc::new(RecommendationEngine::new(Arc::new(catalog))),
            config: Arc::new(config),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }
}
