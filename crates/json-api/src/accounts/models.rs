//! Account Models

use std::fmt::{Debug, Formatter, Result as FmtResult};

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use luxe_app::domain::accounts::{
    data::{Credentials, NewAccount},
    models::Account,
};

/// Register Request
#[derive(Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Debug for RegisterRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for NewAccount {
    fn from(request: RegisterRequest) -> Self {
        NewAccount {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Request
#[derive(Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Debug for LoginRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Confirmation without a payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// Always true
    pub success: bool,

    /// Confirmation text
    pub message: String,
}

/// The public part of an account.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// Account id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        UserResponse {
            id: account.id.into_i64(),
            name: account.name,
            email: account.email,
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Always true
    pub success: bool,

    /// Confirmation text
    pub message: String,

    /// The signed-in user
    pub user: UserResponse,
}
