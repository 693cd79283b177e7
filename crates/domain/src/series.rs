//! Price series, aligned pairs and normalization.
//!
//! A `PriceSeries` is immutable once built: the constructor enforces the
//! invariants (strictly increasing timestamps, positive prices) so every
//! downstream computation can rely on them.

use crate::errors::DomainError;
use crate::token::Token;
use crate::value_objects::date_window::DateWindow;
use crate::value_objects::price::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation of an asset price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Price,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// Ordered price history for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub token: Token,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, validating its invariants.
    ///
    /// # Errors
    /// - `DomainError::NonPositivePrice` if any price is zero or negative.
    /// - `DomainError::NonMonotonicTimestamps` if timestamps are not
    ///   strictly increasing.
    pub fn new(token: Token, points: Vec<PricePoint>) -> Result<Self, DomainError> {
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(DomainError::NonMonotonicTimestamps {
                    at: pair[1].timestamp,
                });
            }
        }
        for point in &points {
            if !point.price.is_positive() {
                return Err(DomainError::NonPositivePrice {
                    price: point.price.value,
                });
            }
        }
        Ok(Self { token, points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Restricts the series to observations inside `window`.
    ///
    /// The result may be empty; deciding whether that is an error belongs
    /// to the caller.
    pub fn slice_window(&self, window: &DateWindow) -> Self {
        let points = self
            .points
            .iter()
            .copied()
            .filter(|p| window.contains(p.timestamp))
            .collect();
        // Invariants survive filtering, no need to re-validate.
        Self {
            token: self.token.clone(),
            points,
        }
    }
}

/// Two price series inner-joined on timestamp.
///
/// Invariant: all three columns have equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePair {
    pub token_a: Token,
    pub token_b: Token,
    pub timestamps: Vec<DateTime<Utc>>,
    pub prices_a: Vec<Decimal>,
    pub prices_b: Vec<Decimal>,
}

impl PricePair {
    /// Aligns two series by keeping only timestamps present in both.
    pub fn align(a: &PriceSeries, b: &PriceSeries) -> Self {
        let mut timestamps = Vec::new();
        let mut prices_a = Vec::new();
        let mut prices_b = Vec::new();

        let (pa, pb) = (a.points(), b.points());
        let (mut i, mut j) = (0usize, 0usize);
        while i < pa.len() && j < pb.len() {
            match pa[i].timestamp.cmp(&pb[j].timestamp) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    timestamps.push(pa[i].timestamp);
                    prices_a.push(pa[i].price.value);
                    prices_b.push(pb[j].price.value);
                    i += 1;
                    j += 1;
                }
            }
        }

        Self {
            token_a: a.token.clone(),
            token_b: b.token.clone(),
            timestamps,
            prices_a,
            prices_b,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Rescales both columns to start at 1.0.
    ///
    /// # Errors
    /// - `DomainError::EmptySeries` if the pair has no rows.
    /// - `DomainError::NonPositivePrice` if a first price is not positive
    ///   (cannot happen for pairs built from validated series).
    pub fn normalize(&self) -> Result<NormalizedPair, DomainError> {
        let (first_a, first_b) = match (self.prices_a.first(), self.prices_b.first()) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return Err(DomainError::EmptySeries),
        };
        if first_a <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price: first_a });
        }
        if first_b <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price: first_b });
        }

        Ok(NormalizedPair {
            token_a: self.token_a.clone(),
            token_b: self.token_b.clone(),
            timestamps: self.timestamps.clone(),
            norm_a: self.prices_a.iter().map(|p| p / first_a).collect(),
            norm_b: self.prices_b.iter().map(|p| p / first_b).collect(),
        })
    }
}

/// A `PricePair` rescaled so each column starts at 1.0 — relative price
/// movement since entry, not absolute price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPair {
    pub token_a: Token,
    pub token_b: Token,
    pub timestamps: Vec<DateTime<Utc>>,
    pub norm_a: Vec<Decimal>,
    pub norm_b: Vec<Decimal>,
}

impl NormalizedPair {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Days between the first and last observation.
    pub fn span_days(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => (*last - *first).num_seconds() as f64 / 86_400.0,
            _ => 0.0,
        }
    }
}
