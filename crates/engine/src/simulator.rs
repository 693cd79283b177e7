//! End-to-end farm simulation.
//!
//! Slices two price series to a window, aligns and normalizes them,
//! derives IL and reward series, composes the strategy table and
//! summarizes both strategies.

use farmdash_domain::errors::{DomainError, EmptyRangeError, UsageError};
use farmdash_domain::metrics::PerformanceMetrics;
use farmdash_domain::metrics::{impermanent_loss, rewards};
use farmdash_domain::value_objects::{DateWindow, Percentage};
use farmdash_domain::{PricePair, PriceSeries};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composer::{SimulationTable, compose};

/// Anything that can go wrong while running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    EmptyRange(#[from] EmptyRangeError),

    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Parameters for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Requested date window.
    pub window: DateWindow,
    /// Annual reward rate.
    pub apr: Percentage,
    /// Daily risk-free rate for the Sharpe ratio.
    pub daily_risk_free: Decimal,
}

impl FarmConfig {
    pub fn new(window: DateWindow, apr: Percentage) -> Self {
        Self {
            window,
            apr,
            daily_risk_free: Decimal::ZERO,
        }
    }

    /// Sets the daily risk-free rate.
    #[must_use]
    pub fn with_daily_risk_free(mut self, rate: Decimal) -> Self {
        self.daily_risk_free = rate;
        self
    }
}

/// Output of one simulation run: the step table plus per-strategy
/// summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmSimulation {
    pub table: SimulationTable,
    pub buy_hold: PerformanceMetrics,
    pub farm: PerformanceMetrics,
}

/// Runs a farming simulation for two price series.
///
/// # Errors
/// - `EmptyRangeError` when the aligned pair has no timestamps inside
///   the window.
/// - `DomainError::EmptySeries` when the overlap is a single point —
///   too short to summarize.
/// - Domain errors from the underlying formulas propagate unchanged.
pub fn simulate_farm(
    series_a: &PriceSeries,
    series_b: &PriceSeries,
    config: &FarmConfig,
) -> Result<FarmSimulation, SimulationError> {
    let a = series_a.slice_window(&config.window);
    let b = series_b.slice_window(&config.window);

    let pair = PricePair::align(&a, &b);
    if pair.is_empty() {
        return Err(EmptyRangeError {
            start: config.window.start(),
            end: config.window.end(),
        }
        .into());
    }
    if pair.len() < 2 {
        return Err(DomainError::EmptySeries.into());
    }

    let norm = pair.normalize()?;

    let il = norm
        .norm_a
        .iter()
        .zip(&norm.norm_b)
        .map(|(a, b)| {
            let ratio = impermanent_loss::price_ratio(*a, *b)?;
            impermanent_loss::il_from_ratio(ratio)
        })
        .collect::<Result<Vec<Decimal>, DomainError>>()?;

    let reward_series = rewards::accrue(config.apr, &norm.timestamps)?;

    let table = compose(&norm, &il, &reward_series, &config.window)?;

    let span_days = norm.span_days();
    let buy_hold = PerformanceMetrics::from_values(
        &table.buy_hold_values(),
        span_days,
        config.daily_risk_free,
    )?;
    let farm =
        PerformanceMetrics::from_values(&table.farm_values(), span_days, config.daily_risk_free)?;

    Ok(FarmSimulation {
        table,
        buy_hold,
        farm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use farmdash_domain::value_objects::Price;
    use farmdash_domain::{PricePoint, PriceSeries, Token};
    use rust_decimal_macros::dec;

    fn ts(day_offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap() + Duration::days(day_offset)
    }

    fn daily_series(symbol: &str, prices: &[Decimal]) -> PriceSeries {
        let token = Token::new(symbol.to_lowercase(), symbol, symbol);
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(ts(i as i64), Price::new(*p)))
            .collect();
        PriceSeries::new(token, points).unwrap()
    }

    fn constant_series(symbol: &str, days: usize) -> PriceSeries {
        daily_series(symbol, &vec![dec!(1); days])
    }

    #[test]
    fn test_flat_prices_zero_apr() {
        // Both assets pinned at 1.0 for a year, no rewards: farming is
        // exactly holding, and every statistic is flat.
        let a = constant_series("BTC", 365);
        let b = constant_series("ETH", 365);
        let window = DateWindow::new(ts(0), ts(364)).unwrap();
        let config = FarmConfig::new(window, Percentage::from_percent(Decimal::ZERO));

        let sim = simulate_farm(&a, &b, &config).unwrap();

        for row in sim.table.rows() {
            assert_eq!(row.impermanent_loss, Decimal::ZERO);
            assert_eq!(row.rewards, Decimal::ZERO);
            assert_eq!(row.farm, row.buy_hold);
        }
        assert_eq!(sim.farm.cagr, Decimal::ZERO);
        assert_eq!(sim.farm.max_drawdown, Decimal::ZERO);
        assert_eq!(sim.farm.sharpe_ratio, None);
    }

    #[test]
    fn test_divergence_produces_il() {
        // B quadruples against A: final ratio 4, IL -20%.
        let a = daily_series("BTC", &[dec!(100), dec!(100), dec!(100)]);
        let b = daily_series("ETH", &[dec!(10), dec!(20), dec!(40)]);
        let window = DateWindow::new(ts(0), ts(2)).unwrap();
        let config = FarmConfig::new(window, Percentage::from_percent(Decimal::ZERO));

        let sim = simulate_farm(&a, &b, &config).unwrap();
        let last = sim.table.final_row().unwrap();

        assert_eq!(last.price_ratio, dec!(4));
        assert!((last.impermanent_loss - dec!(-0.2)).abs() < dec!(0.000000000001));
        // Farm trails buy-and-hold by exactly the IL factor.
        assert!((last.farm - last.buy_hold * dec!(0.8)).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_rewards_lift_farm_over_buy_hold() {
        let a = constant_series("BTC", 181);
        let b = constant_series("ETH", 181);
        let window = DateWindow::new(ts(0), ts(180)).unwrap();
        let config = FarmConfig::new(window, Percentage::from_percent(dec!(25)));

        let sim = simulate_farm(&a, &b, &config).unwrap();
        let last = sim.table.final_row().unwrap();

        // No divergence: farm = 1 * (1 + R).
        let expected_rewards = dec!(0.25) * Decimal::from(180) / Decimal::from(365);
        assert!((last.rewards - expected_rewards).abs() < dec!(0.0000001));
        assert!(last.farm > last.buy_hold);
        assert!(sim.farm.cagr > sim.buy_hold.cagr);
    }

    #[test]
    fn test_disjoint_window_is_empty_range() {
        // Series span 2021, window asks for 2022.
        let start_2021 = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let token = Token::new("bitcoin", "BTC", "Bitcoin");
        let points: Vec<PricePoint> = (0..100)
            .map(|i| PricePoint::new(start_2021 + Duration::days(i), Price::new(dec!(50))))
            .collect();
        let a = PriceSeries::new(token, points).unwrap();
        let b = constant_series("ETH", 100);
        // constant_series starts 2022-01-01, so only `a` misses the window.

        let window = DateWindow::new(
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let config = FarmConfig::new(window, Percentage::from_percent(dec!(10)));

        let err = simulate_farm(&a, &b, &config).unwrap_err();
        assert!(matches!(err, SimulationError::EmptyRange(_)));
    }

    #[test]
    fn test_single_point_overlap_is_too_short() {
        let a = daily_series("BTC", &[dec!(1)]);
        let b = daily_series("ETH", &[dec!(2)]);
        let window = DateWindow::new(ts(0), ts(0)).unwrap();
        let config = FarmConfig::new(window, Percentage::from_percent(dec!(10)));

        let err = simulate_farm(&a, &b, &config).unwrap_err();
        assert_eq!(err, SimulationError::Domain(DomainError::EmptySeries));
    }
}
