use crate::errors::FetchError;
use async_trait::async_trait;
use farmdash_domain::value_objects::DateWindow;
use farmdash_domain::{PriceSeries, Token};

/// Capability: fetch price history for (asset, window).
///
/// The engine depends on this trait, never on a concrete client, so a
/// mock can stand in during tests.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the price history of `token` quoted in `vs_currency`
    /// over `window`.
    async fn price_history(
        &self,
        token: &Token,
        vs_currency: &str,
        window: &DateWindow,
    ) -> Result<PriceSeries, FetchError>;
}
