use std::sync::Arc;

use crate::config::Config;
use crate::tailoring::pipeline::PipelineOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; per-action inputs travel in request bodies.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PipelineOrchestrator>,
    pub config: Config,
}
