use deckmd_core::Config;

/// Shared application state. The service is stateless per request; the only
/// process-wide data is the static configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}
