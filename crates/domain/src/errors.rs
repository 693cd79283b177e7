//! Error types for the domain layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid numeric input to a formula.
///
/// Detected before computing, so callers never receive a silent NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("price ratio must be positive, got {ratio}")]
    NonPositivePriceRatio { ratio: Decimal },

    #[error("price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },

    #[error("timestamps must be strictly increasing (violation at {at})")]
    NonMonotonicTimestamps { at: DateTime<Utc> },

    #[error("value series starts at zero, cannot annualize")]
    ZeroBaseValue,

    #[error("series is empty or too short for this computation")]
    EmptySeries,

    #[error("period spans zero days, cannot annualize")]
    ZeroSpan,

    #[error("numeric conversion overflowed")]
    Conversion,
}

/// Errors detected at the input boundary, before any computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsageError {
    #[error("start date {start} is after end date {end}")]
    InvalidDateWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("exactly two tokens must be selected, got {selected}")]
    TokenSelection { selected: usize },

    #[error("APR cannot be negative, got {apr}%")]
    NegativeApr { apr: Decimal },

    #[error("missing required credential: {variable} is not set")]
    MissingCredential { variable: String },

    #[error("invalid surface scan: {reason}")]
    InvalidScan { reason: String },
}

/// No overlapping data between the requested window and the available
/// series. No partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("no overlapping price data between {start} and {end}")]
pub struct EmptyRangeError {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
