use std::sync::Arc;

use crate::config::Config;
use crate::scoring::FitPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; read-only afterwards.
    pub pipeline: Arc<FitPipeline>,
    pub config: Config,
}
