//! Hot Products Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use luxe_app::domain::products::data::DEFAULT_HOT_PRODUCTS_LIMIT;

use crate::{extensions::*, products::models::ProductResponse};

/// Hot Products Handler
///
/// Returns the featured best sellers, three unless `limit` says otherwise.
#[endpoint(tags("products"), summary = "List Hot Products")]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.state_or_500()?;
    let limit = limit.into_inner().unwrap_or(DEFAULT_HOT_PRODUCTS_LIMIT);

    let products = state
        .app
        .products
        .list_hot_products(limit)
        .await
        .or_500("failed to fetch hot products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
