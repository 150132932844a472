//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{accounts::PgAccountsService, products::PgProductsService},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub accounts: PgAccountsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone()),
            accounts: PgAccountsService::new(db),
            db: test_db,
        }
    }
}
