use farmdash_data::MarketDataProvider;
use std::sync::Arc;

/// Shared application state: the market data capability behind every
/// handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
    pub vs_currency: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            vs_currency: "usd".to_string(),
        }
    }
}
