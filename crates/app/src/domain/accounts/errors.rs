//! Accounts service errors.

use argon2::password_hash::Error as PasswordHashError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(PasswordHashError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateEmail,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => {
                Self::Validation("All fields are required".to_string())
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PasswordHashError> for AccountsServiceError {
    fn from(error: PasswordHashError) -> Self {
        Self::PasswordHash(error)
    }
}
