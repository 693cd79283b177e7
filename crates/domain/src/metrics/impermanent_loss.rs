use crate::errors::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Calculates impermanent loss for a constant product pool.
/// formula: 2 * sqrt(price_ratio) / (1 + price_ratio) - 1
///
/// `price_ratio` is the relative price change of asset B versus asset A
/// since entry: `(P_B,t / P_B,0) / (P_A,t / P_A,0)`.
///
/// # Returns
///
/// The loss as a signed fraction, always <= 0 (e.g. -0.05 for 5% loss).
/// Zero at ratio 1, symmetric under ratio -> 1/ratio.
///
/// # Errors
///
/// `DomainError::NonPositivePriceRatio` for ratios <= 0.
pub fn il_from_ratio(price_ratio: Decimal) -> Result<Decimal, DomainError> {
    if price_ratio <= Decimal::ZERO {
        return Err(DomainError::NonPositivePriceRatio { ratio: price_ratio });
    }

    // sqrt lives on f64; IL is an estimation, so the f64 round trip is
    // acceptable precision-wise.
    let ratio = price_ratio.to_f64().ok_or(DomainError::Conversion)?;
    let il = 2.0 * ratio.sqrt() / (1.0 + ratio) - 1.0;

    Decimal::from_f64(il).ok_or(DomainError::Conversion)
}

/// Price ratio of two normalized prices: `norm_b / norm_a`.
///
/// # Errors
/// `DomainError::NonPositivePriceRatio` when either input is <= 0.
pub fn price_ratio(norm_a: Decimal, norm_b: Decimal) -> Result<Decimal, DomainError> {
    if norm_a <= Decimal::ZERO {
        return Err(DomainError::NonPositivePriceRatio { ratio: norm_a });
    }
    if norm_b <= Decimal::ZERO {
        return Err(DomainError::NonPositivePriceRatio { ratio: norm_b });
    }
    Ok(norm_b / norm_a)
}

/// Impermanent loss from two percent price changes since entry
/// (e.g. +10.0 for a 10% rise, -5.0 for a 5% fall).
///
/// # Errors
/// `DomainError::NonPositivePriceRatio` when a change is <= -100%, which
/// would imply a non-positive price.
pub fn il_from_changes(change_a_pct: Decimal, change_b_pct: Decimal) -> Result<Decimal, DomainError> {
    let hundred = Decimal::from(100);
    let growth_a = Decimal::ONE + change_a_pct / hundred;
    let growth_b = Decimal::ONE + change_b_pct / hundred;

    let ratio = price_ratio(growth_a, growth_b)?;
    il_from_ratio(ratio)
}
