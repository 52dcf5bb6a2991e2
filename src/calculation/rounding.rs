//! Deterministic decimal rounding.
//!
//! Contributions, expenses and net amounts are kept to two decimal places;
//! tax bases and tax amounts are rounded to whole units.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `dp` decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round(Decimal::from_str("388.305").unwrap(), 2), Decimal::from_str("388.31").unwrap());
/// assert_eq!(round(Decimal::from_str("4064.5").unwrap(), 0), Decimal::from(4065));
/// ```
pub fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a money amount to two decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    round(value, 2)
}

/// Rounds a tax basis or tax amount to whole units.
pub fn round_whole(value: Decimal) -> Decimal {
    round(value, 0)
}
