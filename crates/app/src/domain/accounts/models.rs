//! Account Models

use jiff::Timestamp;
use serde::Serialize;

use crate::ids::TypedId;

/// Account Id
pub type AccountId = TypedId<Account>;

/// Account Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Account row including its password hash. Never leaves the service.
#[derive(Debug, Clone)]
pub(crate) struct AccountRecord {
    pub(crate) account: Account,
    pub(crate) password_hash: String,
}
