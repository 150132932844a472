//! End-to-end cart and checkout flow.
//!
//! Walks a shopper from an empty cart to a placed order:
//!
//! 1. Add `sku-1` (price 2500, stock 5) twice -> qty 2
//! 2. Apply `LUXE10` -> 1000 off
//! 3. Totals: subtotal 5000, shipping 0, discount 1000, total 4000
//! 4. Place the order with a complete shipping form
//! 5. The cart is empty, a reload sees it empty, and the receipt is stored

use std::rc::Rc;

use testresult::TestResult;

use luxe::{
    checkout::{Checkout, CheckoutConfig, CheckoutError, OrderPhase, ShippingForm},
    items::ProductRef,
    notifications::{Advisory, RecordingNotifier},
    pricing::{CheckoutTotals, compute_totals},
    promotions::resolve_promo,
    storage::{MemoryStorage, ScopedStorage},
    store::{CartStore, CartStoreError},
};

fn silk_scarf() -> ProductRef {
    ProductRef {
        id: "sku-1".to_string(),
        name: "Silk Scarf".to_string(),
        price: 2500,
        image: "img/scarf.jpg".to_string(),
        stock_limit: 5,
    }
}

fn shipping() -> ShippingForm {
    ShippingForm {
        full_name: Some("Ayesha Khan".to_string()),
        phone: Some("0300 1234567".to_string()),
        address: Some("12 Mall Road".to_string()),
        city: Some("Lahore".to_string()),
        postal: Some("54000".to_string()),
    }
}

#[test]
fn test_order_placement_empties_cart() -> TestResult {
    let storage = MemoryStorage::new();
    let notifier = Rc::new(RecordingNotifier::new());

    let mut store = CartStore::with_notifier(&storage, notifier.clone())?;
    let mut checkout =
        Checkout::with_notifier(&storage, CheckoutConfig::default(), notifier.clone());

    store.add(&silk_scarf())?;
    store.add(&silk_scarf())?;

    checkout.apply_promo("LUXE10")?;

    assert_eq!(
        checkout.totals(store.cart()),
        CheckoutTotals {
            subtotal: 5000,
            shipping: 0,
            discount: 1000,
            total: 4000,
        }
    );

    let order = checkout.place_order(&mut store, &shipping())?;

    assert!(!order.id.as_str().is_empty(), "order id should not be empty");
    assert_eq!(order.discount, 1000);
    assert_eq!(order.items.first().map(|item| item.qty), Some(2));
    assert!(store.get_all().is_empty());

    store.reload()?;

    assert!(store.get_all().is_empty());
    assert_eq!(checkout.last_order()?.map(|receipt| receipt.id), Some(order.id.clone()));
    assert!(matches!(checkout.phase(), OrderPhase::Committed(_)));

    let advisories = notifier.received();

    assert_eq!(
        advisories.first().map(ToString::to_string),
        Some("Added: Silk Scarf".to_string())
    );
    assert_eq!(
        advisories.last(),
        Some(&Advisory::OrderPlaced {
            id: order.id.to_string()
        })
    );

    Ok(())
}

#[test]
fn test_stock_ceiling_holds_across_adds() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;

    for limit in 1..=4_u32 {
        let product = ProductRef {
            id: format!("sku-{limit}"),
            stock_limit: limit,
            ..silk_scarf()
        };

        for _ in 0..limit {
            store.add(&product)?;
        }

        let result = store.add(&product);

        assert!(
            matches!(result, Err(CartStoreError::OutOfStock(_))),
            "add {} of {limit} should fail",
            limit + 1
        );
        assert_eq!(
            store.cart().get(&product.id).map(|item| item.qty),
            Some(limit)
        );
    }

    Ok(())
}

#[test]
fn test_set_quantity_stays_in_bounds() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;
    store.add(&silk_scarf())?;

    for requested in [-10_i64, 0, 1, 3, 5, 6, 9, 1000] {
        let change = store.set_quantity("sku-1", requested)?;

        assert!(
            (1..=5).contains(&change.qty),
            "requested {requested} produced {}",
            change.qty
        );
        assert_eq!(change.limit_reached, requested > 5, "requested {requested}");
    }

    Ok(())
}

#[test]
fn test_totals_are_pure() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;
    store.add(&silk_scarf())?;

    let first = compute_totals(store.cart(), 2000, 150);
    let second = compute_totals(store.cart(), 2000, 150);

    assert_eq!(first, second);
    assert_eq!(first.discount, 2000);

    Ok(())
}

#[test]
fn test_discount_never_exceeds_subtotal() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;

    store.add(&ProductRef {
        price: 750,
        ..silk_scarf()
    })?;

    for code in ["LUXE10", "LUXE20", "bogus"] {
        let promo = resolve_promo(code);
        let totals = compute_totals(store.cart(), promo.amount, 0);

        assert_eq!(totals.discount, promo.amount.min(totals.subtotal), "{code}");
        assert_eq!(
            totals.total,
            totals.subtotal - totals.discount,
            "{code}"
        );
    }

    Ok(())
}

#[test]
fn test_invalid_promo_resets_discount() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;
    let mut checkout = Checkout::new(&storage, CheckoutConfig::default());
    store.add(&silk_scarf())?;

    checkout.apply_promo("  luxe10 ")?;

    assert_eq!(checkout.totals(store.cart()).discount, 1000);

    let rejected = checkout.apply_promo("bogus");

    assert!(rejected.is_err(), "bogus should be rejected");
    assert_eq!(checkout.totals(store.cart()).discount, 0);

    Ok(())
}

#[test]
fn test_empty_cart_order_has_no_side_effects() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;
    let mut checkout = Checkout::new(&storage, CheckoutConfig::default());

    let result = checkout.place_order(&mut store, &shipping());

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(storage.is_empty(), "nothing should be persisted");

    Ok(())
}

#[test]
fn test_removing_unknown_id_changes_nothing() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(&storage)?;
    store.add(&silk_scarf())?;

    let before = store.get_all().to_vec();

    assert!(store.remove("sku-missing")?.is_none());
    assert_eq!(store.get_all(), before.as_slice());
    assert_eq!(store.count(), 1);

    Ok(())
}

#[test]
fn test_sessions_do_not_share_carts() -> TestResult {
    let shared = MemoryStorage::new();

    let mut first = CartStore::open(ScopedStorage::new(&shared, "session-a"))?;
    let mut second = CartStore::open(ScopedStorage::new(&shared, "session-b"))?;

    first.add(&silk_scarf())?;
    second.add(&silk_scarf())?;
    second.add(&silk_scarf())?;

    first.reload()?;
    second.reload()?;

    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 2);

    let mut checkout = Checkout::new(
        ScopedStorage::new(&shared, "session-a"),
        CheckoutConfig::default(),
    );
    checkout.place_order(&mut first, &shipping())?;

    second.reload()?;

    assert_eq!(second.count(), 2);

    Ok(())
}
