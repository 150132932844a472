//! Notifications

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    rc::Rc,
    sync::Arc,
};

use parking_lot::Mutex;
use tracing::info;

/// Non-fatal, user-visible messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// A product was added to the cart.
    ItemAdded {
        /// Product name.
        name: String,
    },

    /// A product could not be added because no more stock is available.
    OutOfStock {
        /// Product name.
        name: String,
    },

    /// A requested quantity was clamped to the stock ceiling.
    StockLimitReached {
        /// Product name.
        name: String,

        /// The ceiling that was applied.
        max_qty: u32,
    },

    /// A promo code was accepted.
    PromoApplied {
        /// Normalized code.
        code: String,

        /// Flat discount in minor units.
        amount: u64,
    },

    /// A promo code was not recognised and any active discount was cleared.
    PromoRejected {
        /// Normalized code.
        code: String,
    },

    /// Checkout was attempted with an empty cart.
    EmptyCart,

    /// Checkout was attempted with missing shipping fields.
    ShippingIncomplete,

    /// An order was placed.
    OrderPlaced {
        /// Order identifier.
        id: String,
    },

    /// Profile name/email saved.
    ProfileUpdated,

    /// Profile avatar replaced.
    AvatarUpdated,

    /// Profile avatar removed.
    AvatarRemoved,

    /// A password change was accepted for hand-off.
    PasswordUpdated,

    /// The local profile was deleted.
    ProfileDeleted,

    /// The signed-in user was cleared.
    SignedOut,
}

impl Display for Advisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ItemAdded { name } => write!(f, "Added: {name}"),
            Self::OutOfStock { name } => write!(f, "{name} is out of stock"),
            Self::StockLimitReached { name, max_qty } => {
                write!(f, "Only {max_qty} of {name} available")
            }
            Self::PromoApplied { code, amount } => {
                write!(f, "{code} applied: {amount} off")
            }
            Self::PromoRejected { .. } => f.write_str("Invalid promo code"),
            Self::EmptyCart => f.write_str("Your cart is empty."),
            Self::ShippingIncomplete => f.write_str("Please fill all shipping fields."),
            Self::OrderPlaced { id } => write!(f, "Order {id} placed"),
            Self::ProfileUpdated => f.write_str("Profile updated"),
            Self::AvatarUpdated => f.write_str("Avatar updated"),
            Self::AvatarRemoved => f.write_str("Avatar removed"),
            Self::PasswordUpdated => f.write_str("Password updated"),
            Self::ProfileDeleted => f.write_str("Local account removed"),
            Self::SignedOut => f.write_str("Logged out successfully"),
        }
    }
}

/// Fire-and-forget sink for transient messages.
pub trait Notifier {
    /// Show `advisory` to the user.
    fn notify(&self, advisory: Advisory);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, advisory: Advisory) {
        (**self).notify(advisory);
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, advisory: Advisory) {
        (**self).notify(advisory);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, advisory: Advisory) {
        (**self).notify(advisory);
    }
}

/// Writes advisories to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, advisory: Advisory) {
        info!(?advisory, "{advisory}");
    }
}

/// Keeps every advisory it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Advisory>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisories received so far.
    pub fn received(&self) -> Vec<Advisory> {
        self.received.lock().clone()
    }

    /// The most recent advisory, if any.
    pub fn last(&self) -> Option<Advisory> {
        self.received.lock().last().cloned()
    }

    /// Drop everything received so far.
    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, advisory: Advisory) {
        self.received.lock().push(advisory);
    }
}
