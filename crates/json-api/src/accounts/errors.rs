//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use luxe_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        error @ AccountsServiceError::DuplicateEmail => {
            StatusError::bad_request().brief(error.to_string())
        }
        AccountsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        error @ AccountsServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief(error.to_string())
        }
        AccountsServiceError::PasswordHash(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
