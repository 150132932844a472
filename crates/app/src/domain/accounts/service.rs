//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    database::Db,
    domain::accounts::{
        data::{Credentials, NewAccount, normalize_email},
        errors::AccountsServiceError,
        models::Account,
        passwords::{hash_password, verify_password, verify_placeholder},
        repository::PgAccountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register_account(&self, account: NewAccount) -> Result<Account, AccountsServiceError> {
        let account = account.normalized()?;
        let password_hash = hash_password(&account.password)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_account(&mut tx, &account.name, &account.email, &password_hash)
            .await?;

        tx.commit().await?;

        debug!(account_id = %created.account.id, "account registered");

        Ok(created.account)
    }

    async fn login(&self, credentials: Credentials) -> Result<Account, AccountsServiceError> {
        let email = normalize_email(&credentials.email);

        if email.is_empty() || credentials.password.is_empty() {
            return Err(AccountsServiceError::Validation(
                "Email and password required".to_string(),
            ));
        }

        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.find_account_by_email(&mut tx, &email).await?;

        tx.commit().await?;

        let Some(record) = record else {
            verify_placeholder(&credentials.password)?;

            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &record.password_hash)? {
            warn!(account_id = %record.account.id, "failed login");

            return Err(AccountsServiceError::InvalidCredentials);
        }

        Ok(record.account)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Registers a new account, hashing its password.
    async fn register_account(&self, account: NewAccount) -> Result<Account, AccountsServiceError>;

    /// Returns the account matching `credentials`.
    async fn login(&self, credentials: Credentials) -> Result<Account, AccountsServiceError>;
}
