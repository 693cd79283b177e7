//! Impermanent-loss grid surface.
//!
//! Exhaustive cartesian evaluation of IL over a percentage scan of two
//! reference prices, sized for 3D rendering. No interpolation happens
//! here; gap-filling is the display layer's concern.

use farmdash_domain::errors::{DomainError, UsageError};
use farmdash_domain::metrics::impermanent_loss;
use farmdash_domain::value_objects::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::simulator::SimulationError;

/// Scan configuration for the surface generator.
///
/// Defaults scan 1%–300% of each reference price with 300 steps per
/// axis, the resolution the 3D dashboard variant renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Reference price of the base token.
    pub base_reference: Price,
    /// Reference price of the quote token.
    pub quote_reference: Price,
    /// Lower bound of the scan, in percent of the reference price.
    pub min_pct: Decimal,
    /// Upper bound of the scan, in percent of the reference price.
    pub max_pct: Decimal,
    /// Number of grid points per axis.
    pub steps: usize,
}

impl SurfaceConfig {
    pub fn new(base_reference: Price, quote_reference: Price) -> Self {
        Self {
            base_reference,
            quote_reference,
            min_pct: Decimal::ONE,
            max_pct: Decimal::from(300),
            steps: 300,
        }
    }

    /// Sets the scan bounds in percent.
    #[must_use]
    pub fn with_scan(mut self, min_pct: Decimal, max_pct: Decimal) -> Self {
        self.min_pct = min_pct;
        self.max_pct = max_pct;
        self
    }

    /// Sets the number of steps per axis.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if !self.base_reference.is_positive() {
            return Err(DomainError::NonPositivePrice {
                price: self.base_reference.value,
            }
            .into());
        }
        if !self.quote_reference.is_positive() {
            return Err(DomainError::NonPositivePrice {
                price: self.quote_reference.value,
            }
            .into());
        }
        if self.min_pct <= Decimal::ZERO || self.max_pct < self.min_pct {
            return Err(UsageError::InvalidScan {
                reason: format!(
                    "percent bounds must satisfy 0 < min <= max, got {}..{}",
                    self.min_pct, self.max_pct
                ),
            }
            .into());
        }
        if self.steps < 2 {
            return Err(UsageError::InvalidScan {
                reason: format!("at least 2 steps per axis required, got {}", self.steps),
            }
            .into());
        }
        Ok(())
    }

    /// Generates the full IL surface for this scan.
    ///
    /// # Errors
    /// Invalid reference prices or scan bounds are rejected before any
    /// grid point is evaluated.
    pub fn generate(&self) -> Result<IlSurface, SimulationError> {
        self.validate()?;

        let base_prices = self.axis(self.base_reference.value);
        let quote_prices = self.axis(self.quote_reference.value);

        let mut il = Vec::with_capacity(self.steps);
        for base_price in &base_prices {
            let base_move = base_price / self.base_reference.value;
            let mut row = Vec::with_capacity(self.steps);
            for quote_price in &quote_prices {
                let quote_move = quote_price / self.quote_reference.value;
                let ratio = impermanent_loss::price_ratio(base_move, quote_move)?;
                row.push(impermanent_loss::il_from_ratio(ratio)?);
            }
            il.push(row);
        }

        Ok(IlSurface {
            base_prices,
            quote_prices,
            il,
        })
    }

    /// Inclusive linear scan of `min_pct`..`max_pct` applied to `reference`.
    fn axis(&self, reference: Decimal) -> Vec<Decimal> {
        let hundred = Decimal::from(100);
        let span = self.max_pct - self.min_pct;
        let last = Decimal::from(self.steps as u64 - 1);

        (0..self.steps)
            .map(|i| {
                let pct = self.min_pct + span * Decimal::from(i as u64) / last;
                reference * pct / hundred
            })
            .collect()
    }
}

/// IL evaluated over the cartesian product of two price axes.
///
/// `il[i][j]` is the loss at `base_prices[i]` and `quote_prices[j]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IlSurface {
    pub base_prices: Vec<Decimal>,
    pub quote_prices: Vec<Decimal>,
    pub il: Vec<Vec<Decimal>>,
}

impl IlSurface {
    pub fn steps(&self) -> (usize, usize) {
        (self.base_prices.len(), self.quote_prices.len())
    }
}
