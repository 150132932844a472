//! Login Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{
        errors::into_status_error,
        models::{LoginRequest, LoginResponse},
    },
    extensions::*,
};

/// Login Handler
///
/// Checks an email and password and returns the matching user.
#[endpoint(
    tags("accounts"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Email and password required"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let account = state
        .app
        .accounts
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful!".to_string(),
        user: account.into(),
    }))
}
