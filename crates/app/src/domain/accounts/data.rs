//! Accounts Data

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::domain::accounts::errors::AccountsServiceError;

/// Trim and lower-case an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// New Account Data
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    /// Return a copy with trimmed name and normalized email.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsServiceError::Validation`] when any field is blank.
    pub fn normalized(&self) -> Result<Self, AccountsServiceError> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);

        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(AccountsServiceError::Validation(
                "All fields are required".to_string(),
            ));
        }

        Ok(Self {
            name,
            email,
            password: self.password.clone(),
        })
    }
}

impl Debug for NewAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login Credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
