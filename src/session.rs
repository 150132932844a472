//! Session

use serde::{Deserialize, Serialize};

use crate::{
    notifications::{Advisory, Notifier},
    storage::{SESSION_USER_KEY, Storage, StorageError, read_json, write_json},
};

/// The signed-in user as returned by login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,
}

/// Remember `user` as signed in.
///
/// # Errors
///
/// Returns a [`StorageError`] if the store cannot be written.
pub fn sign_in(storage: &impl Storage, user: &SessionUser) -> Result<(), StorageError> {
    write_json(storage, SESSION_USER_KEY, user)
}

/// The signed-in user, if any. A stored user without a name counts as signed out.
///
/// # Errors
///
/// Returns a [`StorageError`] if the store cannot be read.
pub fn current(storage: &impl Storage) -> Result<Option<SessionUser>, StorageError> {
    Ok(read_json::<SessionUser>(storage, SESSION_USER_KEY)?.filter(|user| !user.name.is_empty()))
}

/// Forget the signed-in user.
///
/// # Errors
///
/// Returns a [`StorageError`] if the store cannot be written.
pub fn sign_out(storage: &impl Storage, notifier: &dyn Notifier) -> Result<(), StorageError> {
    storage.remove(SESSION_USER_KEY)?;

    notifier.notify(Advisory::SignedOut);

    Ok(())
}
