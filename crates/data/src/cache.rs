//! TTL read-through cache over any market data provider.

use crate::errors::FetchError;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use farmdash_domain::value_objects::DateWindow;
use farmdash_domain::{PriceSeries, Token};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default freshness window, matching the original dashboard's 60-second
/// cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    coin_id: String,
    vs_currency: String,
    from: i64,
    to: i64,
}

struct CacheEntry {
    fetched_at: Instant,
    series: PriceSeries,
}

impl CacheEntry {
    fn is_stale(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

/// Read-through cache keyed by request parameters.
///
/// Holds fetched series for `ttl`; a stale entry is refetched on the
/// next request. Derived results are never cached — only raw series.
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl<P> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_default_ttl(inner: P) -> Self {
        Self::new(inner, DEFAULT_TTL)
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    async fn price_history(
        &self,
        token: &Token,
        vs_currency: &str,
        window: &DateWindow,
    ) -> Result<PriceSeries, FetchError> {
        let key = CacheKey {
            coin_id: token.coingecko_id.clone(),
            vs_currency: vs_currency.to_string(),
            from: window.start().timestamp(),
            to: window.end().timestamp(),
        };

        {
            let entries = self.entries.lock().expect("cache lock poisoned");
            if let Some(entry) = entries.get(&key) {
                if !entry.is_stale(self.ttl) {
                    debug!(coin_id = %key.coin_id, "cache hit");
                    return Ok(entry.series.clone());
                }
            }
        }

        let series = self.inner.price_history(token, vs_currency, window).await?;

        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                fetched_at: Instant::now(),
                series: series.clone(),
            },
        );
        Ok(series)
    }
}
