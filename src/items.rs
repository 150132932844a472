//! Items

use serde::{Deserialize, Serialize};

/// A product as offered to the cart, carrying its current stock ceiling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRef {
    /// Product SKU, unique per cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Opaque image reference.
    pub image: String,

    /// Units available for purchase; `0` means none can be added.
    pub stock_limit: u32,
}

/// One product entry in a cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product SKU, unique per cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Opaque image reference.
    #[serde(default)]
    pub image: String,

    /// Requested quantity, never below 1.
    pub qty: u32,

    /// Stock ceiling; `0` means no known limit.
    #[serde(default)]
    pub max_qty: u32,
}

impl LineItem {
    /// Creates a single-unit line item for the given product.
    pub fn from_product(product: &ProductRef) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            qty: 1,
            max_qty: product.stock_limit,
        }
    }

    /// Price multiplied by quantity, saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.qty))
    }

    /// Whether a stock ceiling is known for this item.
    pub fn has_stock_ceiling(&self) -> bool {
        self.max_qty > 0
    }

    /// Whether the item satisfies the quantity bounds.
    pub fn is_within_bounds(&self) -> bool {
        self.qty >= 1 && (!self.has_stock_ceiling() || self.qty <= self.max_qty)
    }
}
