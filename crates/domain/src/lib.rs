//! Core domain model for LP farming analytics.
//!
//! Pure data types and closed-form math shared by every presentation
//! variant: price series, impermanent loss, reward accrual and
//! performance statistics. No I/O happens in this crate.

pub mod errors;
pub mod metrics;
pub mod series;
pub mod token;
pub mod value_objects;

pub use errors::{DomainError, EmptyRangeError, UsageError};
pub use series::{NormalizedPair, PricePair, PricePoint, PriceSeries};
pub use token::Token;
