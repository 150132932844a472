//! Product Models

use jiff::Timestamp;
use serde::Serialize;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub category: String,
    pub image_url: String,
    pub is_hot: bool,
    pub stock_quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
