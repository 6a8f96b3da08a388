//! Application state for the HTTP server

use crate::{Config, ImageBundler};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned per request (two `Arc` clones). Holds no per-run data.
#[derive(Clone)]
pub struct AppState {
    /// Bundler that runs each upload
    pub bundler: Arc<ImageBundler>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(bundler: Arc<ImageBundler>, config: Arc<Config>) -> Self {
        Self { bundler, config }
    }
}
