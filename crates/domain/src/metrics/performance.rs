//! Summary statistics for a strategy value series.

use crate::errors::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.0;

/// Per-strategy scalar summary over the full span of a value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Compound annual growth rate.
    pub cagr: Decimal,
    /// Standard deviation of daily returns, annualized.
    pub annual_volatility: Decimal,
    /// Annualized Sharpe ratio. `None` when the return series has zero
    /// variance — undefined, not coerced to a number.
    pub sharpe_ratio: Option<Decimal>,
    /// Worst decline from a running peak, in [-1, 0].
    pub max_drawdown: Decimal,
}

impl PerformanceMetrics {
    /// Computes all metrics for a value series spanning `span_days`
    /// calendar days, with a daily risk-free rate for the Sharpe ratio.
    ///
    /// # Errors
    /// - `DomainError::EmptySeries` for fewer than two values.
    /// - `DomainError::ZeroSpan` when `span_days` is not positive.
    /// - `DomainError::ZeroBaseValue` when the series starts at zero.
    pub fn from_values(
        values: &[Decimal],
        span_days: f64,
        daily_risk_free: Decimal,
    ) -> Result<Self, DomainError> {
        if values.len() < 2 {
            return Err(DomainError::EmptySeries);
        }

        let returns = daily_returns(values)?;

        Ok(Self {
            cagr: cagr(values, span_days)?,
            annual_volatility: annualized_volatility(&returns)?,
            sharpe_ratio: sharpe_ratio(&returns, daily_risk_free)?,
            max_drawdown: max_drawdown(values)?,
        })
    }
}

/// Day-over-day fractional changes; one element shorter than `values`.
///
/// # Errors
/// `DomainError::ZeroBaseValue` if any base value is zero.
pub fn daily_returns(values: &[Decimal]) -> Result<Vec<Decimal>, DomainError> {
    values
        .windows(2)
        .map(|pair| {
            if pair[0].is_zero() {
                Err(DomainError::ZeroBaseValue)
            } else {
                Ok((pair[1] - pair[0]) / pair[0])
            }
        })
        .collect()
}

/// Annualizes total return over `span_days` using a 365-day year:
/// `(V_last / V_first) ^ (365 / span_days) - 1`.
///
/// # Errors
/// - `DomainError::EmptySeries` for an empty series.
/// - `DomainError::ZeroBaseValue` when the series starts at zero.
/// - `DomainError::ZeroSpan` when `span_days` is not positive.
pub fn cagr(values: &[Decimal], span_days: f64) -> Result<Decimal, DomainError> {
    let (first, last) = match (values.first(), values.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(DomainError::EmptySeries),
    };
    if first.is_zero() {
        return Err(DomainError::ZeroBaseValue);
    }
    if span_days <= 0.0 {
        return Err(DomainError::ZeroSpan);
    }

    let total = (last / first).to_f64().ok_or(DomainError::Conversion)?;
    let annualized = total.powf(DAYS_PER_YEAR / span_days) - 1.0;

    Decimal::from_f64(annualized).ok_or(DomainError::Conversion)
}

/// Sample standard deviation of daily returns, scaled by sqrt(365).
///
/// Fewer than two returns carry no dispersion information; the result is
/// zero in that case.
pub fn annualized_volatility(returns: &[Decimal]) -> Result<Decimal, DomainError> {
    let std = match sample_std(returns)? {
        Some(std) => std * DAYS_PER_YEAR.sqrt(),
        None => 0.0,
    };
    Decimal::from_f64(std).ok_or(DomainError::Conversion)
}

/// Annualized Sharpe ratio: `sqrt(365) * mean(excess) / std(excess)`.
///
/// Returns `Ok(None)` when the excess-return series has zero variance —
/// the ratio is undefined there and must not be silently coerced.
pub fn sharpe_ratio(
    returns: &[Decimal],
    daily_risk_free: Decimal,
) -> Result<Option<Decimal>, DomainError> {
    let excess: Vec<Decimal> = returns.iter().map(|r| r - daily_risk_free).collect();

    let Some(std) = sample_std(&excess)? else {
        return Ok(None);
    };
    if std == 0.0 {
        return Ok(None);
    }

    let mean = mean_f64(&excess)?;
    let sharpe = DAYS_PER_YEAR.sqrt() * mean / std;

    Decimal::from_f64(sharpe)
        .map(Some)
        .ok_or(DomainError::Conversion)
}

/// Worst peak-to-trough decline: `min_t(V_t / running_max - 1)`.
///
/// # Errors
/// `DomainError::EmptySeries` for an empty series.
pub fn max_drawdown(values: &[Decimal]) -> Result<Decimal, DomainError> {
    let mut peak = *values.first().ok_or(DomainError::EmptySeries)?;
    let mut max_dd = Decimal::ZERO;

    for value in values {
        if *value > peak {
            peak = *value;
        }
        if peak > Decimal::ZERO {
            let drawdown = (value - peak) / peak;
            if drawdown < max_dd {
                max_dd = drawdown;
            }
        }
    }

    Ok(max_dd)
}

fn mean_f64(xs: &[Decimal]) -> Result<f64, DomainError> {
    let mut sum = 0.0;
    for x in xs {
        sum += x.to_f64().ok_or(DomainError::Conversion)?;
    }
    Ok(sum / xs.len() as f64)
}

/// Sample standard deviation (ddof = 1); `None` for fewer than two points.
fn sample_std(xs: &[Decimal]) -> Result<Option<f64>, DomainError> {
    if xs.len() < 2 {
        return Ok(None);
    }
    let mean = mean_f64(xs)?;
    let mut sq_sum = 0.0;
    for x in xs {
        let x = x.to_f64().ok_or(DomainError::Conversion)?;
        sq_sum += (x - mean) * (x - mean);
    }
    let variance = sq_sum / (xs.len() - 1) as f64;
    Ok(Some(variance.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constant_series_metrics() {
        // Flat at 1.0 for a year: no growth, no volatility, no drawdown,
        // Sharpe undefined.
        let values = vec![dec!(1); 365];
        let metrics = PerformanceMetrics::from_values(&values, 364.0, Decimal::ZERO).unwrap();

        assert_eq!(metrics.cagr, Decimal::ZERO);
        assert_eq!(metrics.annual_volatility, Decimal::ZERO);
        assert_eq!(metrics.sharpe_ratio, None);
        assert_eq!(metrics.max_drawdown, Decimal::ZERO);
    }

    #[test]
    fn test_cagr_doubling_over_a_year() {
        let values = vec![dec!(1), dec!(2)];
        let growth = cagr(&values, 365.0).unwrap();
        assert!((growth - Decimal::ONE).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_cagr_annualizes_shorter_spans() {
        // Doubling in half a year compounds to 4x annually.
        let values = vec![dec!(1), dec!(2)];
        let growth = cagr(&values, 182.5).unwrap();
        assert!((growth - dec!(3)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_cagr_zero_base_fails() {
        assert_eq!(
            cagr(&[dec!(0), dec!(2)], 30.0),
            Err(DomainError::ZeroBaseValue)
        );
    }

    #[test]
    fn test_cagr_zero_span_fails() {
        assert_eq!(cagr(&[dec!(1), dec!(2)], 0.0), Err(DomainError::ZeroSpan));
    }

    #[test]
    fn test_max_drawdown_bounds() {
        let values = vec![dec!(1), dec!(1.5), dec!(0.75), dec!(1.2), dec!(0.9)];
        let dd = max_drawdown(&values).unwrap();

        // Worst decline: 1.5 -> 0.75 = -50%.
        assert_eq!(dd, dec!(-0.5));
        assert!(dd >= dec!(-1) && dd <= Decimal::ZERO);
    }

    #[test]
    fn test_max_drawdown_monotonic_series_is_zero() {
        let values = vec![dec!(1), dec!(2), dec!(3)];
        assert_eq!(max_drawdown(&values).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_sharpe_with_variance() {
        let returns = vec![dec!(0.01), dec!(-0.005), dec!(0.02), dec!(0.003)];
        let sharpe = sharpe_ratio(&returns, Decimal::ZERO).unwrap();
        assert!(sharpe.is_some());
    }

    #[test]
    fn test_sharpe_risk_free_shifts_mean_only() {
        let returns = vec![dec!(0.01), dec!(-0.005), dec!(0.02), dec!(0.003)];
        let base = sharpe_ratio(&returns, Decimal::ZERO).unwrap().unwrap();
        let shifted = sharpe_ratio(&returns, dec!(0.001)).unwrap().unwrap();
        assert!(shifted < base);
    }

    #[test]
    fn test_daily_returns() {
        let values = vec![dec!(100), dec!(110), dec!(99)];
        let returns = daily_returns(&values).unwrap();
        assert_eq!(returns, vec![dec!(0.1), dec!(-0.1)]);
    }

    #[test]
    fn test_daily_returns_zero_base_fails() {
        assert_eq!(
            daily_returns(&[dec!(0), dec!(1)]),
            Err(DomainError::ZeroBaseValue)
        );
    }

    #[test]
    fn test_volatility_scales_with_dispersion() {
        let calm = vec![dec!(0.001), dec!(-0.001), dec!(0.001), dec!(-0.001)];
        let wild = vec![dec!(0.05), dec!(-0.05), dec!(0.05), dec!(-0.05)];

        let calm_vol = annualized_volatility(&calm).unwrap();
        let wild_vol = annualized_volatility(&wild).unwrap();
        assert!(wild_vol > calm_vol);
    }
}
