//! Shared money helpers.
//!
//! Rounding and currency display used by the export formatters and the
//! projection engine.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use twin_core::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as currency with exactly two decimal places.
///
/// No thousands separators are inserted. Negative amounts keep their sign
/// after the symbol (`$-12.00`).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use twin_core::common::format_currency;
///
/// assert_eq!(format_currency(dec!(3200)), "$3200.00");
/// assert_eq!(format_currency(dec!(1234.565)), "$1234.57");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    format!("{CURRENCY_SYMBOL}{rounded}")
}
