//! Catalog

use serde::{Deserialize, Serialize};

use crate::items::ProductRef;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// A product record as served by the product API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Database id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Unit price in minor units.
    pub price: u64,

    /// Category label.
    pub category: String,

    /// Image reference.
    pub image_url: String,

    /// Whether the product is featured as a best seller.
    #[serde(default)]
    pub is_hot: bool,

    /// Units in stock.
    #[serde(default)]
    pub stock_quantity: u32,
}

impl CatalogProduct {
    /// Cart id for this product.
    pub fn sku(&self) -> String {
        format!("sku-{}", self.id)
    }

    /// The cart's view of this product.
    pub fn to_product_ref(&self) -> ProductRef {
        ProductRef {
            id: self.sku(),
            name: self.name.clone(),
            price: self.price,
            image: self.image_url.clone(),
            stock_limit: self.stock_quantity,
        }
    }
}

/// Storefront filter: category plus case-insensitive name search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Category to show; `None` or [`ALL_CATEGORIES`] shows every category.
    pub category: Option<String>,

    /// Name substring, matched case-insensitively after trimming.
    pub query: String,
}

impl CatalogFilter {
    /// Whether `product` passes the filter.
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category.eq_ignore_ascii_case(category),
        };

        let query = self.query.trim().to_lowercase();

        category_ok && (query.is_empty() || product.name.to_lowercase().contains(&query))
    }

    /// Products passing the filter, in input order.
    pub fn apply<'a>(&self, products: &'a [CatalogProduct]) -> Vec<&'a CatalogProduct> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}
