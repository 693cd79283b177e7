use crate::errors::UsageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed date range `[start, end]`.
///
/// Construction rejects inverted ranges, so a `DateWindow` held anywhere
/// in the system is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a window.
    ///
    /// # Errors
    /// Returns `UsageError::InvalidDateWindow` when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, UsageError> {
        if start > end {
            return Err(UsageError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the last `days` days ending at `end`.
    pub fn last_days(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: end - chrono::Duration::days(i64::from(days)),
            end,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Span of the window in whole days, rounded down.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
