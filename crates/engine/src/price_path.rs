//! Synthetic price paths for offline demos and tests.

use chrono::{DateTime, Duration, Utc};
use farmdash_domain::errors::DomainError;
use farmdash_domain::value_objects::Price;
use farmdash_domain::{PricePoint, PriceSeries, Token};
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

pub trait PricePathGenerator {
    fn generate(&mut self, steps: usize) -> Vec<Price>;
}

/// Geometric Brownian motion path.
pub struct GeometricBrownianMotion {
    pub initial_price: Decimal,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: Decimal, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
        }
    }

    /// Daily GBM with the given annualized parameters.
    pub fn daily(initial_price: Decimal, drift: f64, volatility: f64) -> Self {
        Self::new(initial_price, drift, volatility, 1.0 / 365.0)
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Vec<Price> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(Price::new(self.initial_price));

        let mut rng = rand::rng();
        let normal = Normal::new(0.0, 1.0).expect("unit normal is well-formed");

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self.initial_price.to_f64().unwrap_or(1.0);

        for _ in 0..steps {
            let z = normal.sample(&mut rng);
            let change = (drift_term + vol_term * z).exp();
            current_price *= change;

            // exp keeps the path positive; the fallback only fires on
            // f64 overflow.
            let p = Decimal::from_f64(current_price).unwrap_or(self.initial_price);
            prices.push(Price::new(p));
        }

        prices
    }
}

/// Replays a fixed path; used to drive simulations from test fixtures.
pub struct DeterministicPricePath {
    pub prices: Vec<Price>,
}

impl DeterministicPricePath {
    pub fn new(prices: Vec<Price>) -> Self {
        Self { prices }
    }
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, _steps: usize) -> Vec<Price> {
        self.prices.clone()
    }
}

/// Stamps a generated path onto daily timestamps starting at `start`.
///
/// # Errors
/// Propagates series validation: the path must be positive throughout.
pub fn into_daily_series(
    token: Token,
    start: DateTime<Utc>,
    prices: Vec<Price>,
) -> Result<PriceSeries, DomainError> {
    let points = prices
        .into_iter()
        .enumerate()
        .map(|(i, price)| PricePoint::new(start + Duration::days(i as i64), price))
        .collect();
    PriceSeries::new(token, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_gbm_generation() {
        let mut gbm = GeometricBrownianMotion::daily(dec!(100), 0.0, 0.2);
        let path = gbm.generate(10);

        assert_eq!(path.len(), 11); // initial + 10 steps
        assert_eq!(path[0].value, dec!(100));

        // With non-zero volatility the path moves.
        let all_same = path.iter().all(|p| p.value == dec!(100));
        assert!(!all_same);
        // And stays positive.
        assert!(path.iter().all(|p| p.is_positive()));
    }

    #[test]
    fn test_into_daily_series() {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let mut path = DeterministicPricePath::new(vec![
            Price::new(dec!(1)),
            Price::new(dec!(2)),
            Price::new(dec!(3)),
        ]);

        let series =
            into_daily_series(Token::new("bitcoin", "BTC", "Bitcoin"), start, path.generate(3))
                .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first().unwrap().timestamp, start);
        assert_eq!(
            series.last().unwrap().timestamp,
            start + Duration::days(2)
        );
    }
}
