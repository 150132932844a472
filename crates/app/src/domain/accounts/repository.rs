//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::accounts::models::{Account, AccountId, AccountRecord};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const FIND_ACCOUNT_BY_EMAIL_SQL: &str = include_str!("sql/find_account_by_email.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_account_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            account: Account {
                id: AccountId::from_i64(row.try_get("id")?),
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}
