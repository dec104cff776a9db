//! Common helpers shared by the projection calculators.
//!
//! Rounding, percentage conversion and compound growth live here so every
//! calculator rounds and escalates money the same way.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Months in a billing year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

const ONE_HUNDRED: Decimal = dec!(100);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(83.3333)), dec!(83.33));
/// assert_eq!(round_half_up(dec!(41.665)), dec!(41.67));
/// assert_eq!(round_half_up(dec!(-41.665)), dec!(-41.67)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an annual percentage into a yearly growth multiplier.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::growth_factor;
///
/// assert_eq!(growth_factor(dec!(6)), dec!(1.06));
/// assert_eq!(growth_factor(dec!(-2.5)), dec!(0.975));
/// ```
pub fn growth_factor(percent: Decimal) -> Decimal {
    Decimal::ONE + percent / ONE_HUNDRED
}

/// Raises `factor` to a non-negative integer power by repeated multiplication.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::compound;
///
/// assert_eq!(compound(dec!(1.05), 0), dec!(1));
/// assert_eq!(compound(dec!(1.05), 2), dec!(1.1025));
/// ```
pub fn compound(
    factor: Decimal,
    periods: u32,
) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result *= factor;
    }
    result
}
