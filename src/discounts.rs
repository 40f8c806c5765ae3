//! Discount arithmetic
//!
//! Percentage-of-amount helpers shared by all four rule evaluators.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::Money;
use thiserror::Error;

use crate::prices::Amount;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate the discount amount in minor units for a percentage of a
/// minor-unit amount.
///
/// Midpoints round away from zero, which on positive amounts is the half-up
/// rounding of the two-decimal currency value.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows
/// or cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Percentage of a money amount, rounded to whole minor units.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows
/// or cannot be represented.
pub fn percent_of(percent: &Percentage, amount: Amount) -> Result<Amount, DiscountError> {
    let minor = percent_of_minor(percent, amount.to_minor_units())?;

    Ok(Money::from_minor(minor, amount.currency()))
}
