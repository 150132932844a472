//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use luxe_app::{
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, models::Account},
        products::{MockProductsService, models::Product},
    },
};

use crate::state::State;

pub(crate) fn make_product(id: i64, name: &str) -> Product {
    Product {
        id: id.into(),
        name: name.to_string(),
        description: None,
        price: 2500,
        category: "Accessories".to_string(),
        image_url: format!("img/{id}.jpg"),
        is_hot: false,
        stock_quantity: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_hot_product(id: i64) -> Product {
    Product {
        is_hot: true,
        ..make_product(id, "Best Seller")
    }
}

pub(crate) fn make_account(id: i64) -> Account {
    Account {
        id: id.into(),
        name: "Ayesha".to_string(),
        email: "ayesha@example.com".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_list_hot_products().never();
    products.expect_create_product().never();

    products
}

pub(crate) fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_register_account().never();
    accounts.expect_login().never();

    accounts
}

pub(crate) fn make_state(
    products: MockProductsService,
    accounts: MockAccountsService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        accounts: Arc::new(accounts),
    })
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(products, strict_accounts_mock())))
            .push(route),
    )
}

pub(crate) fn accounts_service(accounts: MockAccountsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(strict_products_mock(), accounts)))
            .push(route),
    )
}
