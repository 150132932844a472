//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use luxe_app::domain::products::ProductsServiceError;

pub(crate) const MISSING_FIELDS: &str = "Missing required fields";

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief(MISSING_FIELDS)
        }
        ProductsServiceError::InvalidData | ProductsServiceError::OutOfRange(_) => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product query failed: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::NotFound => StatusError::not_found(),
    }
}
