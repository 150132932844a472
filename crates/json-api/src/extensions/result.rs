//! Result helpers for storefront handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Turn a service failure the shopper cannot fix into a logged 500.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(context, %source, "storefront request failed");

            StatusError::internal_server_error()
        })
    }
}
