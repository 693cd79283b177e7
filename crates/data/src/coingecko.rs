//! CoinGecko market data provider.

use crate::errors::FetchError;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use chrono::DateTime;
use farmdash_domain::value_objects::{DateWindow, Price};
use farmdash_domain::{PricePoint, PriceSeries, Token};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Client for the CoinGecko `market_chart/range` endpoint.
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// Raw `market_chart` payload: `prices` is a list of
/// `[unix_millis, price]` pairs.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Attaches a demo API key, sent as `x-cg-demo-api-key`.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the API base URL (used by tests against a local stub).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Converts a raw payload into a validated series.
    ///
    /// An empty `prices` array is an error, never a fallback to some
    /// other column: missing data must surface to the user.
    fn parse_series(token: &Token, payload: MarketChartResponse) -> Result<PriceSeries, FetchError> {
        if payload.prices.is_empty() {
            return Err(FetchError::EmptyHistory {
                coin_id: token.coingecko_id.clone(),
            });
        }

        let mut rows = payload.prices;
        rows.sort_by_key(|(ms, _)| *ms);
        rows.dedup_by_key(|(ms, _)| *ms);

        let mut points = Vec::with_capacity(rows.len());
        for (ms, price) in rows {
            let timestamp = DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                FetchError::MalformedResponse(format!("timestamp {ms} out of range"))
            })?;
            let price = Decimal::from_f64(price).ok_or_else(|| {
                FetchError::MalformedResponse(format!("price {price} is not representable"))
            })?;
            points.push(PricePoint::new(timestamp, Price::new(price)));
        }

        Ok(PriceSeries::new(token.clone(), points)?)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn price_history(
        &self,
        token: &Token,
        vs_currency: &str,
        window: &DateWindow,
    ) -> Result<PriceSeries, FetchError> {
        let url = format!(
            "{}/coins/{}/market_chart/range",
            self.base_url, token.coingecko_id
        );
        debug!(coin_id = %token.coingecko_id, %vs_currency, "fetching market chart");

        let mut request = self.client.get(&url).query(&[
            ("vs_currency", vs_currency.to_string()),
            ("from", window.start().timestamp().to_string()),
            ("to", window.end().timestamp().to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(coin_id = %token.coingecko_id, code = status.as_u16(), "upstream error");
            return Err(FetchError::Status {
                coin_id: token.coingecko_id.clone(),
                code: status.as_u16(),
            });
        }

        let payload: MarketChartResponse = response.json().await?;
        Self::parse_series(token, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc() -> Token {
        Token::new("bitcoin", "BTC", "Bitcoin")
    }

    #[test]
    fn test_parse_series() {
        let payload = MarketChartResponse {
            prices: vec![
                (1_640_995_200_000, 46_300.5),
                (1_641_081_600_000, 47_100.0),
                (1_641_168_000_000, 46_800.25),
            ],
        };

        let series = CoinGeckoProvider::parse_series(&btc(), payload).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first().unwrap().price.value, dec!(46300.5));
    }

    #[test]
    fn test_parse_sorts_and_dedups() {
        let payload = MarketChartResponse {
            prices: vec![
                (1_641_081_600_000, 47_100.0),
                (1_640_995_200_000, 46_300.5),
                (1_641_081_600_000, 47_200.0),
            ],
        };

        let series = CoinGeckoProvider::parse_series(&btc(), payload).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().price.value, dec!(46300.5));
    }

    #[test]
    fn test_empty_payload_is_an_error() {
        let payload = MarketChartResponse { prices: vec![] };
        let err = CoinGeckoProvider::parse_series(&btc(), payload).unwrap_err();
        assert!(matches!(err, FetchError::EmptyHistory { .. }));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let payload = MarketChartResponse {
            prices: vec![(1_640_995_200_000, 0.0)],
        };
        let err = CoinGeckoProvider::parse_series(&btc(), payload).unwrap_err();
        assert!(matches!(err, FetchError::InvalidSeries(_)));
    }

    #[test]
    fn test_payload_deserialization() {
        let json = r#"{"prices": [[1640995200000, 46300.5], [1641081600000, 47100.0]]}"#;
        let payload: MarketChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.prices.len(), 2);
        assert_eq!(payload.prices[0].0, 1_640_995_200_000);
    }
}
