//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::ProbeConfig;
use crate::probe::{CommandUptime, UptimeSource};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub uptime: Arc<dyn UptimeSource>,
}

impl AppState {
    /// Creates application state backed by the configured uptime command.
    pub fn new(probe: &ProbeConfig) -> Self {
        Self::with_uptime_source(Arc::new(CommandUptime::new(probe)))
    }

    /// Creates application state with an explicit uptime source.
    pub fn with_uptime_source(uptime: Arc<dyn UptimeSource>) -> Self {
        Self { uptime }
    }
}
