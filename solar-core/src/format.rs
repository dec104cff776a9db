//! US-dollar display formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const ONE_MILLION: Decimal = dec!(1000000);

/// Formats a value as dollars and cents with thousands separators.
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::format_currency;
///
/// assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
/// assert_eq!(format_currency(dec!(-41.666)), "-$41.67");
/// ```
pub fn format_currency(value: Decimal) -> String {
    with_sign(value, &group_thousands(&fixed(value.abs(), 2)))
}

/// Formats a value compactly: `$2.5M` at one million and above, otherwise
/// whole dollars.
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::format_currency_abbreviated;
///
/// assert_eq!(format_currency_abbreviated(dec!(2500000)), "$2.5M");
/// assert_eq!(format_currency_abbreviated(dec!(48210.49)), "$48,210");
/// ```
pub fn format_currency_abbreviated(value: Decimal) -> String {
    let magnitude = value.abs();
    if magnitude >= ONE_MILLION {
        let millions = fixed(magnitude / ONE_MILLION, 1);
        return with_sign(value, &format!("{millions}M"));
    }
    with_sign(value, &group_thousands(&fixed(magnitude, 0)))
}

/// Rounds half away from zero and renders exactly `places` decimals.
fn fixed(
    value: Decimal,
    places: u32,
) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded.to_string()
}

fn with_sign(
    value: Decimal,
    body: &str,
) -> String {
    let is_zero = body.chars().all(|c| !c.is_ascii_digit() || c == '0');
    if value.is_sign_negative() && !is_zero {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Inserts commas every three digits of the integer part.
fn group_thousands(number: &str) -> String {
    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(number.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{grouped}.{fraction}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_pads_to_two_decimals() {
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(7)), "$7.00");
    }

    #[test]
    fn format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(83.335)), "$83.34");
        assert_eq!(format_currency(dec!(83.334)), "$83.33");
    }

    #[test]
    fn format_currency_groups_large_values() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(100000)), "$100,000.00");
    }

    #[test]
    fn format_currency_handles_negative_and_zero() {
        assert_eq!(format_currency(dec!(-1500)), "-$1,500.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    // =========================================================================
    // format_currency_abbreviated tests
    // =========================================================================

    #[test]
    fn abbreviated_uses_millions_suffix() {
        assert_eq!(format_currency_abbreviated(dec!(2500000)), "$2.5M");
        assert_eq!(format_currency_abbreviated(dec!(1000000)), "$1.0M");
        assert_eq!(format_currency_abbreviated(dec!(12345678)), "$12.3M");
    }

    #[test]
    fn abbreviated_rounds_to_whole_dollars_below_a_million() {
        assert_eq!(format_currency_abbreviated(dec!(999999.4)), "$999,999");
        assert_eq!(format_currency_abbreviated(dec!(1234.5)), "$1,235");
        assert_eq!(format_currency_abbreviated(dec!(12)), "$12");
    }

    #[test]
    fn abbreviated_handles_negative_values() {
        assert_eq!(format_currency_abbreviated(dec!(-2500000)), "-$2.5M");
        assert_eq!(format_currency_abbreviated(dec!(-1234.5)), "-$1,235");
    }
}
