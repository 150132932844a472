//! Pricing

use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Derived checkout amounts, all in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    /// Sum of `price * qty` over all items.
    pub subtotal: u64,

    /// Flat shipping, `0` for an empty cart.
    pub shipping: u64,

    /// Promo discount, never more than the subtotal.
    pub discount: u64,

    /// `subtotal + shipping - discount`.
    pub total: u64,
}

/// Compute checkout totals for `cart`.
///
/// `shipping_flat` is charged only when the cart has items, and
/// `promo_amount` is capped at the subtotal so the total can never go
/// negative. Sums saturate at `u64::MAX`.
pub fn compute_totals(cart: &Cart, promo_amount: u64, shipping_flat: u64) -> CheckoutTotals {
    let subtotal = cart.subtotal();

    let shipping = if cart.is_empty() { 0 } else { shipping_flat };
    let discount = promo_amount.min(subtotal);

    let total = subtotal.saturating_add(shipping).saturating_sub(discount);

    CheckoutTotals {
        subtotal,
        shipping,
        discount,
        total,
    }
}
