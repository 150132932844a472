//! Money display

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Amount could not be represented as [`Money`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("amount {0} is too large to display")]
pub struct AmountTooLarge(pub u64);

/// Convert a minor-unit amount into [`Money`] for display.
///
/// # Errors
///
/// Returns [`AmountTooLarge`] when `amount` exceeds `i64::MAX`.
pub fn to_money(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, AmountTooLarge> {
    let minor = i64::try_from(amount).map_err(|_err| AmountTooLarge(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// Render a minor-unit amount in `currency`'s display format.
///
/// # Errors
///
/// Returns [`AmountTooLarge`] when `amount` exceeds `i64::MAX`.
pub fn format_amount(amount: u64, currency: &'static Currency) -> Result<String, AmountTooLarge> {
    Ok(to_money(amount, currency)?.to_string())
}
