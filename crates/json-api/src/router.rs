//! App Router

use salvo::{
    Router,
    cors::{Any, Cors, CorsHandler},
};

use crate::{accounts, healthcheck, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("api")
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .post(products::create::handler),
                )
                .push(Router::with_path("hot-products").get(products::hot::handler))
                .push(Router::with_path("register").post(accounts::register::handler))
                .push(Router::with_path("login").post(accounts::login::handler)),
        )
}

/// Any origin may call the storefront API.
pub(crate) fn cors() -> CorsHandler {
    Cors::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .into_handler()
}
