//! Register Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{
        errors::into_status_error,
        models::{MessageResponse, RegisterRequest},
    },
    extensions::*,
};

/// Register Handler
///
/// Creates an account from a name, email and password.
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::OK, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;

    state
        .app
        .accounts
        .register_account(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "User registered successfully!".to_string(),
    }))
}
