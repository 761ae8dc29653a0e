//! Application state for the HTTP server

use crate::config::Config;
use crate::pipeline::NewsPipeline;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// Pipeline run on every page load
    pub pipeline: Arc<NewsPipeline>,

    /// Configuration (export file name, etc.)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(pipeline: Arc<NewsPipeline>, config: Arc<Config>) -> Self {
        Self { pipeline, config }
    }
}
