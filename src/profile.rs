//! Profile
//!
//! Locally edited name, email and avatar. Password changes are validated here
//! but never stored; the accepted value is handed to the account service.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    notifications::{Advisory, Notifier, TracingNotifier},
    storage::{PROFILE_KEY, Storage, StorageError, read_json, write_json},
};

/// Errors raised by profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No new password was entered.
    #[error("Enter a new password")]
    EmptyPassword,

    /// The confirmation does not match.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Locally stored profile. Every field is optional in storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Contact email.
    #[serde(default)]
    pub email: String,

    /// Avatar image as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_data_url: Option<String>,
}

impl Profile {
    /// Name to show, with a placeholder when unset.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Your Name"
        } else {
            &self.name
        }
    }

    /// Email to show, with a placeholder when unset.
    pub fn display_email(&self) -> &str {
        if self.email.is_empty() {
            "you@example.com"
        } else {
            &self.email
        }
    }
}

/// A validated password change, ready for the account service.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordChange {
    new_password: String,
}

impl PasswordChange {
    /// The accepted password.
    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    /// Consume the change, returning the password.
    pub fn into_inner(self) -> String {
        self.new_password
    }
}

impl Debug for PasswordChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PasswordChange")
            .field("new_password", &"<redacted>")
            .finish()
    }
}

/// Reads and writes the local profile.
pub struct ProfileStore<S> {
    storage: S,
    notifier: Box<dyn Notifier>,
}

impl<S: Debug> Debug for ProfileStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProfileStore")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl<S: Storage> ProfileStore<S> {
    /// Create a profile store logging advisories via `tracing`.
    pub fn new(storage: S) -> Self {
        Self::with_notifier(storage, TracingNotifier)
    }

    /// Create a profile store sending advisories to `notifier`.
    pub fn with_notifier(storage: S, notifier: impl Notifier + 'static) -> Self {
        Self {
            storage,
            notifier: Box::new(notifier),
        }
    }

    /// The stored profile, or an empty one when missing or corrupt.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn load(&self) -> Result<Profile, StorageError> {
        Ok(read_json(&self.storage, PROFILE_KEY)?.unwrap_or_default())
    }

    /// Save trimmed `name` and `email`, keeping the avatar.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the profile cannot be read or written.
    pub fn update(&self, name: &str, email: &str) -> Result<Profile, StorageError> {
        let mut profile = self.load()?;

        profile.name = name.trim().to_string();
        profile.email = email.trim().to_string();

        self.save(&profile, Advisory::ProfileUpdated)?;

        Ok(profile)
    }

    /// Replace the avatar.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the profile cannot be read or written.
    pub fn set_avatar(&self, data_url: impl Into<String>) -> Result<Profile, StorageError> {
        let mut profile = self.load()?;

        profile.avatar_data_url = Some(data_url.into());

        self.save(&profile, Advisory::AvatarUpdated)?;

        Ok(profile)
    }

    /// Remove the avatar.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the profile cannot be read or written.
    pub fn remove_avatar(&self) -> Result<Profile, StorageError> {
        let mut profile = self.load()?;

        profile.avatar_data_url = None;

        self.save(&profile, Advisory::AvatarRemoved)?;

        Ok(profile)
    }

    /// Validate a password change.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::EmptyPassword`]: `new_password` is empty.
    /// - [`ProfileError::PasswordMismatch`]: `confirmation` differs.
    pub fn change_password(
        &self,
        new_password: &str,
        confirmation: &str,
    ) -> Result<PasswordChange, ProfileError> {
        if new_password.is_empty() {
            return Err(ProfileError::EmptyPassword);
        }

        if new_password != confirmation {
            return Err(ProfileError::PasswordMismatch);
        }

        self.notifier.notify(Advisory::PasswordUpdated);

        Ok(PasswordChange {
            new_password: new_password.to_string(),
        })
    }

    /// Delete the stored profile.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    pub fn delete(&self) -> Result<(), StorageError> {
        self.storage.remove(PROFILE_KEY)?;

        self.notifier.notify(Advisory::ProfileDeleted);

        Ok(())
    }

    fn save(&self, profile: &Profile, advisory: Advisory) -> Result<(), StorageError> {
        write_json(&self.storage, PROFILE_KEY, profile)?;

        self.notifier.notify(advisory);

        Ok(())
    }
}
