//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use luxe_app::domain::products::models::Product;

/// A product as served to the storefront.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Long description
    pub description: Option<String>,

    /// Unit price in minor currency units
    pub price: u64,

    /// Category label
    pub category: String,

    /// Image reference
    pub image_url: String,

    /// Featured as a best seller
    pub is_hot: bool,

    /// Units in stock
    pub stock_quantity: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image_url: product.image_url,
            is_hot: product.is_hot,
            stock_quantity: product.stock_quantity,
        }
    }
}
