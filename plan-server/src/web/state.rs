//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::{Clock, SystemClock};
use crate::request::RequestBuilder;

/// Clock shared between request handlers.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Builds resolved requests from decoded parameters
    pub builder: Arc<RequestBuilder<SharedClock>>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state using the system clock.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new app state reading "now" from `clock`.
    pub fn with_clock(config: ServerConfig, clock: SharedClock) -> Self {
        Self {
            builder: Arc::new(RequestBuilder::new(clock)),
            config: Arc::new(config),
        }
    }
}
