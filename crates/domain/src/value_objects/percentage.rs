use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A rate stored as a fraction (0.25 for 25%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    /// Builds from percent points: `25.0` means 25%.
    pub fn from_percent(percent: Decimal) -> Self {
        Self(percent / Decimal::from(100))
    }

    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0
    }

    pub fn as_percent(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn to_bps(&self) -> u32 {
        (self.0 * Decimal::from(10000)).to_u32().unwrap_or(0)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_round_trip() {
        let apr = Percentage::from_percent(dec!(36.5));
        assert_eq!(apr.as_fraction(), dec!(0.365));
        assert_eq!(apr.as_percent(), dec!(36.5));
    }

    #[test]
    fn test_bps() {
        let fee = Percentage::from_bps(30);
        assert_eq!(fee.as_fraction(), dec!(0.003));
        assert_eq!(fee.to_bps(), 30);
    }
}
