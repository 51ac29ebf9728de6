use crate::config::Config;
use crate::upstream::UpstreamClient;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream service clients (assistant + speech-to-text)
    pub upstream: Arc<UpstreamClient>,

    /// Loaded service configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream));
        Self {
            upstream,
            config: Arc::new(config),
        }
    }
}
