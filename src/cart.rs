//! Cart

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::LineItem;

/// Ways a cart can violate its invariants, usually because persisted state was tampered with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The same product id appears more than once.
    #[error("item {0} appears more than once")]
    DuplicateItem(String),

    /// An item's quantity is zero or above its stock ceiling (id, qty, max qty).
    #[error("item {0} has quantity {1} outside 1..={2}")]
    QuantityOutOfBounds(String, u32, u32),
}

/// Ordered line items, insertion order preserved for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from existing items, checking the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when ids repeat or a quantity is out of bounds.
    pub fn with_items(items: impl Into<Vec<LineItem>>) -> Result<Self, CartError> {
        let cart = Self {
            items: items.into(),
        };

        cart.validate()?;

        Ok(cart)
    }

    /// Check that ids are unique and every quantity is within bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartError`] found, scanning in display order.
    pub fn validate(&self) -> Result<(), CartError> {
        let mut seen = rustc_hash::FxHashSet::default();

        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(CartError::DuplicateItem(item.id.clone()));
            }

            if !item.is_within_bounds() {
                return Err(CartError::QuantityOutOfBounds(
                    item.id.clone(),
                    item.qty,
                    item.max_qty,
                ));
            }
        }

        Ok(())
    }

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up an item by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn push(&mut self, item: LineItem) {
        debug_assert!(self.get(&item.id).is_none(), "duplicate id {}", item.id);

        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;

        Some(self.items.remove(index))
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all items, used for badge rendering.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Sum of `price * qty` across all items, saturating at `u64::MAX`.
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Consume the cart, returning its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}
