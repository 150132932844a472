//! Create Product Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use luxe_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::errors::{MISSING_FIELDS, into_status_error},
};

/// Create Product Request
///
/// Name, price, category and image are required.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub stock_quantity: u32,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl CreateProductRequest {
    fn into_new_product(self) -> Option<NewProduct> {
        Some(NewProduct {
            name: required(self.name)?,
            description: self.description.filter(|text| !text.trim().is_empty()),
            price: self.price?,
            category: required(self.category)?,
            image_url: required(self.image)?,
            is_hot: self.is_hot,
            stock_quantity: self.stock_quantity,
        })
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Always true
    pub success: bool,

    /// Created product id
    pub id: i64,

    /// Confirmation text
    pub message: String,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::OK, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing required fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = json
        .into_inner()
        .into_new_product()
        .ok_or_else(|| StatusError::bad_request().brief(MISSING_FIELDS))?;

    let id = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?
        .id;

    Ok(Json(ProductCreatedResponse {
        success: true,
        id: id.into_i64(),
        message: "Product added successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use luxe_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").post(handler))
    }

    fn scarf() -> NewProduct {
        NewProduct {
            name: "Silk Scarf".to_string(),
            description: None,
            price: 2500,
            category: "Accessories".to_string(),
            image_url: "img/scarf.jpg".to_string(),
            is_hot: false,
            stock_quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| *new == scarf())
            .return_once(|_| Ok(make_product(41, "Silk Scarf")));

        repo.expect_list_products().never();
        repo.expect_list_hot_products().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Silk Scarf",
                "price": 2500,
                "category": "Accessories",
                "image": "img/scarf.jpg",
                "stock_quantity": 5
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductCreatedResponse = res.take_json().await?;

        assert!(body.success, "success flag should be set");
        assert_eq!(body.id, 41);
        assert_eq!(body.message, "Product added successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_fields_returns_400() {
        for body in [
            json!({ "price": 2500, "category": "Accessories", "image": "a.jpg" }),
            json!({ "name": "Scarf", "category": "Accessories", "image": "a.jpg" }),
            json!({ "name": "Scarf", "price": 2500, "category": " ", "image": "a.jpg" }),
            json!({ "name": "Scarf", "price": 2500, "category": "Accessories" }),
        ] {
            let mut repo = MockProductsService::new();

            repo.expect_create_product().never();
            repo.expect_list_products().never();
            repo.expect_list_hot_products().never();

            let res = TestClient::post("http://example.com/products")
                .json(&body)
                .send(&make_service(repo))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "{body}");
        }
    }

    #[tokio::test]
    async fn test_create_product_rejected_by_service_returns_400() {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidData));

        repo.expect_list_products().never();
        repo.expect_list_hot_products().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Silk Scarf",
                "price": 2500,
                "category": "Accessories",
                "image": "img/scarf.jpg"
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn blank_description_is_dropped() {
        let product = CreateProductRequest {
            name: Some("Ring".to_string()),
            description: Some("  ".to_string()),
            price: Some(900),
            category: Some("Jewellery".to_string()),
            image: Some("ring.png".to_string()),
            ..CreateProductRequest::default()
        }
        .into_new_product();

        assert_eq!(product.map(|p| p.description), Some(None));
    }
}
