//! Products Data

use crate::domain::products::errors::ProductsServiceError;

/// Number of hot products returned when no limit is given.
pub const DEFAULT_HOT_PRODUCTS_LIMIT: u32 = 3;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub category: String,
    pub image_url: String,
    pub is_hot: bool,
    pub stock_quantity: u32,
}

impl NewProduct {
    /// Check that every required text field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::MissingRequiredData`] when name, category
    /// or image is blank.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        let blank = [&self.name, &self.category, &self.image_url]
            .into_iter()
            .any(|value| value.trim().is_empty());

        if blank {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        Ok(())
    }
}
