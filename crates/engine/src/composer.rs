//! Strategy composition.
//!
//! Combines a normalized price pair with per-step impermanent loss and
//! cumulative rewards into the simulation table every presentation
//! variant consumes.

use chrono::{DateTime, Utc};
use farmdash_domain::NormalizedPair;
use farmdash_domain::value_objects::DateWindow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::simulator::SimulationError;
use farmdash_domain::errors::EmptyRangeError;

/// One timestep of a composed simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRow {
    pub timestamp: DateTime<Utc>,
    /// Relative price change of B versus A since entry.
    pub price_ratio: Decimal,
    /// Signed fraction, <= 0.
    pub impermanent_loss: Decimal,
    /// Cumulative farming rewards since entry, as a fraction.
    pub rewards: Decimal,
    /// Equal-weight buy-and-hold baseline value.
    pub buy_hold: Decimal,
    /// LP value: price movement, IL and rewards applied multiplicatively.
    pub farm: Decimal,
}

/// Derived table for one simulation run, indexed by timestamp.
/// Never mutated after composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTable {
    rows: Vec<SimulationRow>,
}

impl SimulationTable {
    pub fn rows(&self) -> &[SimulationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn final_row(&self) -> Option<&SimulationRow> {
        self.rows.last()
    }

    pub fn buy_hold_values(&self) -> Vec<Decimal> {
        self.rows.iter().map(|r| r.buy_hold).collect()
    }

    pub fn farm_values(&self) -> Vec<Decimal> {
        self.rows.iter().map(|r| r.farm).collect()
    }
}

/// Composes the strategy table:
/// `buy_hold_t = (norm_a_t + norm_b_t) / 2` and
/// `farm_t = buy_hold_t * (1 + IL_t) * (1 + R_t)`.
///
/// `il` and `rewards` must be aligned with `norm` (one entry per
/// timestamp); the simulator guarantees this.
///
/// # Errors
/// `EmptyRangeError` when the pair has zero overlapping timestamps in
/// the requested window — no table is produced.
pub fn compose(
    norm: &NormalizedPair,
    il: &[Decimal],
    rewards: &[Decimal],
    window: &DateWindow,
) -> Result<SimulationTable, SimulationError> {
    if norm.is_empty() {
        return Err(EmptyRangeError {
            start: window.start(),
            end: window.end(),
        }
        .into());
    }
    debug_assert_eq!(norm.len(), il.len());
    debug_assert_eq!(norm.len(), rewards.len());

    let two = Decimal::from(2);
    let rows = norm
        .timestamps
        .iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let buy_hold = (norm.norm_a[i] + norm.norm_b[i]) / two;
            let farm = buy_hold * (Decimal::ONE + il[i]) * (Decimal::ONE + rewards[i]);
            SimulationRow {
                timestamp: *timestamp,
                price_ratio: norm.norm_b[i] / norm.norm_a[i],
                impermanent_loss: il[i],
                rewards: rewards[i],
                buy_hold,
                farm,
            }
        })
        .collect();

    Ok(SimulationTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use farmdash_domain::{PricePair, PricePoint, PriceSeries, Token};
    use farmdash_domain::value_objects::Price;
    use rust_decimal_macros::dec;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, day, 0, 0, 0).unwrap()
    }

    fn normalized(prices_a: &[Decimal], prices_b: &[Decimal]) -> NormalizedPair {
        let points = |prices: &[Decimal]| -> Vec<PricePoint> {
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(ts(i as u32 + 1), Price::new(*p)))
                .collect()
        };
        let a = PriceSeries::new(Token::new("bitcoin", "BTC", "Bitcoin"), points(prices_a)).unwrap();
        let b = PriceSeries::new(Token::new("ethereum", "ETH", "Ethereum"), points(prices_b)).unwrap();
        PricePair::align(&a, &b).normalize().unwrap()
    }

    #[test]
    fn test_farm_equals_buy_hold_without_il_or_rewards() {
        let norm = normalized(&[dec!(100), dec!(120)], &[dec!(50), dec!(55)]);
        let zeros = vec![Decimal::ZERO; 2];
        let window = DateWindow::new(ts(1), ts(2)).unwrap();

        let table = compose(&norm, &zeros, &zeros, &window).unwrap();
        for row in table.rows() {
            assert_eq!(row.farm, row.buy_hold);
        }
    }

    #[test]
    fn test_buy_hold_is_equal_weight_average() {
        let norm = normalized(&[dec!(100), dec!(120)], &[dec!(50), dec!(60)]);
        let zeros = vec![Decimal::ZERO; 2];
        let window = DateWindow::new(ts(1), ts(2)).unwrap();

        let table = compose(&norm, &zeros, &zeros, &window).unwrap();
        // Both up 20%: buy-and-hold sits at 1.2.
        assert_eq!(table.rows()[1].buy_hold, dec!(1.2));
    }

    #[test]
    fn test_multiplicative_combination() {
        let norm = normalized(&[dec!(100), dec!(100)], &[dec!(50), dec!(50)]);
        let il = vec![Decimal::ZERO, dec!(-0.1)];
        let rewards = vec![Decimal::ZERO, dec!(0.2)];
        let window = DateWindow::new(ts(1), ts(2)).unwrap();

        let table = compose(&norm, &il, &rewards, &window).unwrap();
        // 1.0 * (1 - 0.1) * (1 + 0.2) = 1.08
        assert_eq!(table.rows()[1].farm, dec!(1.08));
    }

    #[test]
    fn test_empty_overlap_is_an_error() {
        let a = PriceSeries::new(
            Token::new("bitcoin", "BTC", "Bitcoin"),
            vec![PricePoint::new(ts(1), Price::new(dec!(1)))],
        )
        .unwrap();
        let b = PriceSeries::new(
            Token::new("ethereum", "ETH", "Ethereum"),
            vec![PricePoint::new(ts(2), Price::new(dec!(1)))],
        )
        .unwrap();
        let pair = PricePair::align(&a, &b);
        assert!(pair.is_empty());

        let norm = NormalizedPair {
            token_a: pair.token_a.clone(),
            token_b: pair.token_b.clone(),
            timestamps: vec![],
            norm_a: vec![],
            norm_b: vec![],
        };
        let window = DateWindow::new(ts(1), ts(2)).unwrap();

        let err = compose(&norm, &[], &[], &window).unwrap_err();
        assert!(matches!(err, SimulationError::EmptyRange(_)));
    }
}
