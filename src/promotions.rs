//! Promotions
//!
//! Promo codes are flat discounts looked up in a fixed table. A checkout has
//! a single promo slot: the last applied code wins, and applying a code that
//! is not in the table empties the slot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notifications::{Advisory, Notifier};

/// A known promo code and its flat discount in minor units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromoCode {
    /// Canonical (upper-case) code.
    pub code: &'static str,

    /// Flat discount in minor units.
    pub amount: u64,
}

/// The promo codes accepted at checkout.
pub const PROMO_CODES: [PromoCode; 2] = [
    PromoCode {
        code: "LUXE10",
        amount: 1000,
    },
    PromoCode {
        code: "LUXE20",
        amount: 2000,
    },
];

/// Errors raised when applying a promo code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// The code is not in the promo table. Any active discount was cleared.
    #[error("Invalid promo code")]
    InvalidPromoCode(String),
}

/// Trim and upper-case a user-entered code.
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Look up the discount for an already normalized code.
pub fn lookup(code: &str) -> Option<PromoCode> {
    PROMO_CODES.iter().copied().find(|promo| promo.code == code)
}

/// Result of resolving a user-entered code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoResolution {
    /// Normalized code.
    pub code: String,

    /// Whether the code is known.
    pub valid: bool,

    /// Discount in minor units, `0` when invalid.
    pub amount: u64,

    /// Message suitable for display.
    pub message: String,
}

/// Normalize `code` and look it up in [`PROMO_CODES`].
pub fn resolve_promo(code: &str) -> PromoResolution {
    let code = normalize(code);

    match lookup(&code) {
        Some(promo) => PromoResolution {
            message: format!("{} discount applied", promo.code),
            code,
            valid: true,
            amount: promo.amount,
        },
        None => PromoResolution {
            code,
            valid: false,
            amount: 0,
            message: "Invalid promo code".to_string(),
        },
    }
}

/// A promo code that has been accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPromo {
    /// Normalized code.
    pub code: String,

    /// Flat discount in minor units.
    pub amount: u64,
}

/// The single active promo for a checkout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromoSlot {
    active: Option<AppliedPromo>,
}

impl PromoSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `code`, replacing whatever was active.
    ///
    /// Posts [`Advisory::PromoApplied`] or [`Advisory::PromoRejected`] to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::InvalidPromoCode`] for unknown codes. The slot is
    /// empty afterwards.
    pub fn apply(
        &mut self,
        code: &str,
        notifier: &dyn Notifier,
    ) -> Result<&AppliedPromo, PromoError> {
        let resolution = resolve_promo(code);

        if !resolution.valid {
            self.active = None;

            notifier.notify(Advisory::PromoRejected {
                code: resolution.code.clone(),
            });

            return Err(PromoError::InvalidPromoCode(resolution.code));
        }

        notifier.notify(Advisory::PromoApplied {
            code: resolution.code.clone(),
            amount: resolution.amount,
        });

        Ok(self.active.insert(AppliedPromo {
            code: resolution.code,
            amount: resolution.amount,
        }))
    }

    /// Remove the active promo.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// The active promo, if any.
    pub fn active(&self) -> Option<&AppliedPromo> {
        self.active.as_ref()
    }

    /// Discount of the active promo, `0` when the slot is empty.
    pub fn amount(&self) -> u64 {
        self.active.as_ref().map_or(0, |promo| promo.amount)
    }
}
