//! Linear farming reward accrual.
//!
//! Models reward-token emission proportional to time held: an APR of 25%
//! pays out 25/365 % per day, undiscounted and uncompounded.

use crate::errors::UsageError;
use crate::value_objects::percentage::Percentage;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_YEAR: u32 = 365;

/// Cumulative reward series over `timestamps`.
///
/// Each element is the fraction of position value accrued since the first
/// timestamp: `R_t = elapsed_days(t) * apr / 365`. The series is
/// non-decreasing and starts at exactly zero.
///
/// # Errors
/// `UsageError::NegativeApr` for a negative rate — a configuration error
/// caught at the boundary.
pub fn accrue(apr: Percentage, timestamps: &[DateTime<Utc>]) -> Result<Vec<Decimal>, UsageError> {
    if apr.is_negative() {
        return Err(UsageError::NegativeApr {
            apr: apr.as_percent(),
        });
    }

    let daily_rate = apr.as_fraction() / Decimal::from(DAYS_PER_YEAR);

    let Some(entry) = timestamps.first() else {
        return Ok(Vec::new());
    };

    Ok(timestamps
        .iter()
        .map(|ts| {
            let elapsed_days =
                Decimal::from((*ts - *entry).num_seconds()) / Decimal::from(SECONDS_PER_DAY);
            daily_rate * elapsed_days
        })
        .collect())
}
