//! Checkout
//!
//! Turns the cart into an order. Order placement walks
//! `Idle -> Validating -> Failed | Committing -> Committed` and is
//! all-or-nothing: either the receipt is written and the cart cleared, or the
//! receipt and cart are left as they were.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rusty_money::iso::{self, Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    cart::Cart,
    money::{AmountTooLarge, format_amount},
    notifications::{Advisory, Notifier, TracingNotifier},
    orders::{Order, OrderId},
    pricing::{CheckoutTotals, compute_totals},
    promotions::{AppliedPromo, PromoError, PromoSlot},
    storage::{LAST_ORDER_KEY, Storage, StorageError, read_json, write_json},
    store::{CartStore, CartStoreError},
};

/// Checkout settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Shipping charged on non-empty carts, in minor units.
    pub shipping_flat: u64,

    /// Currency used to display amounts.
    pub currency: &'static Currency,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_flat: 0,
            currency: iso::PKR,
        }
    }
}

/// Required shipping form fields, in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShippingField {
    /// Recipient name.
    FullName,
    /// Contact phone.
    Phone,
    /// Street address.
    Address,
    /// City.
    City,
    /// Postal code.
    Postal,
}

impl ShippingField {
    /// Every field, in check order.
    pub const ALL: [Self; 5] = [
        Self::FullName,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::Postal,
    ];

    /// Form field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::Postal => "postal",
        }
    }
}

impl Display for ShippingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Shipping details as entered; absent fields are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    /// Recipient name.
    pub full_name: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub postal: Option<String>,
}

impl ShippingForm {
    /// Value entered for `field`.
    pub fn get(&self, field: ShippingField) -> Option<&str> {
        match field {
            ShippingField::FullName => self.full_name.as_deref(),
            ShippingField::Phone => self.phone.as_deref(),
            ShippingField::Address => self.address.as_deref(),
            ShippingField::City => self.city.as_deref(),
            ShippingField::Postal => self.postal.as_deref(),
        }
    }
}

/// Outcome of shipping form validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingValidation {
    /// Whether every field is filled in.
    pub valid: bool,

    /// Missing or blank fields, in check order.
    pub missing: Vec<ShippingField>,
}

/// Check that every required field is present and non-blank after trimming.
pub fn validate_shipping_form(form: &ShippingForm) -> ShippingValidation {
    let missing: Vec<ShippingField> = ShippingField::ALL
        .into_iter()
        .filter(|&field| form.get(field).is_none_or(|value| value.trim().is_empty()))
        .collect();

    ShippingValidation {
        valid: missing.is_empty(),
        missing,
    }
}

fn field_list(fields: &[ShippingField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// Required shipping fields are missing.
    #[error("missing shipping fields: {}", field_list(.missing))]
    InvalidShippingForm {
        /// Missing fields, in check order.
        missing: Vec<ShippingField>,
    },

    /// The cart could not be cleared; the previous receipt was restored.
    #[error(transparent)]
    Store(#[from] CartStoreError),

    /// The receipt could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why the last order attempt failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The cart was empty.
    EmptyCart,
    /// Shipping fields were missing.
    InvalidShippingForm,
    /// Persisting the receipt or clearing the cart failed.
    StorageUnavailable,
}

/// Where order placement currently stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderPhase {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Checking cart and shipping details.
    Validating,
    /// The last attempt failed; the next attempt starts from [`OrderPhase::Idle`].
    Failed(FailureReason),
    /// Writing the receipt and clearing the cart.
    Committing,
    /// The order was placed.
    Committed(OrderId),
}

/// Checkout calculator for one session.
pub struct Checkout<S> {
    storage: S,
    config: CheckoutConfig,
    promo: PromoSlot,
    phase: OrderPhase,
    notifier: Box<dyn Notifier>,
}

impl<S: Debug> Debug for Checkout<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Checkout")
            .field("storage", &self.storage)
            .field("config", &self.config)
            .field("promo", &self.promo)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<S: Storage> Checkout<S> {
    /// Create a checkout writing receipts to `storage`, logging advisories via `tracing`.
    pub fn new(storage: S, config: CheckoutConfig) -> Self {
        Self::with_notifier(storage, config, TracingNotifier)
    }

    /// Create a checkout sending advisories to `notifier`.
    pub fn with_notifier(
        storage: S,
        config: CheckoutConfig,
        notifier: impl Notifier + 'static,
    ) -> Self {
        Self {
            storage,
            config,
            promo: PromoSlot::new(),
            phase: OrderPhase::Idle,
            notifier: Box::new(notifier),
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Current order placement phase.
    pub fn phase(&self) -> &OrderPhase {
        &self.phase
    }

    /// Apply a promo code, replacing any active one.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::InvalidPromoCode`] for unknown codes, after
    /// clearing the active discount.
    pub fn apply_promo(&mut self, code: &str) -> Result<&AppliedPromo, PromoError> {
        self.promo.apply(code, &*self.notifier)
    }

    /// The active promo, if any.
    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.active()
    }

    /// Drop the active promo.
    pub fn clear_promo(&mut self) {
        self.promo.clear();
    }

    /// Totals for `cart` with the active promo.
    pub fn totals(&self, cart: &Cart) -> CheckoutTotals {
        compute_totals(cart, self.promo.amount(), self.config.shipping_flat)
    }

    /// Render `amount` in the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`AmountTooLarge`] when `amount` cannot be represented.
    pub fn format_amount(&self, amount: u64) -> Result<String, AmountTooLarge> {
        format_amount(amount, self.config.currency)
    }

    /// Place an order for everything in `store`.
    ///
    /// On success the receipt is stored under [`LAST_ORDER_KEY`], the cart
    /// is cleared and the promo slot emptied.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing to order; nothing is written.
    /// - [`CheckoutError::InvalidShippingForm`]: fields missing; nothing is written.
    /// - [`CheckoutError::Storage`]: the receipt could not be written.
    /// - [`CheckoutError::Store`]: the cart could not be cleared; the
    ///   previous receipt is restored.
    pub fn place_order<C: Storage>(
        &mut self,
        store: &mut CartStore<C>,
        form: &ShippingForm,
    ) -> Result<Order, CheckoutError> {
        if matches!(
            self.phase,
            OrderPhase::Failed(_) | OrderPhase::Committed(_)
        ) {
            self.transition(OrderPhase::Idle);
        }

        self.transition(OrderPhase::Validating);

        if store.cart().is_empty() {
            self.notifier.notify(Advisory::EmptyCart);

            return Err(self.fail(FailureReason::EmptyCart, CheckoutError::EmptyCart));
        }

        let validation = validate_shipping_form(form);

        if !validation.valid {
            self.notifier.notify(Advisory::ShippingIncomplete);

            return Err(self.fail(
                FailureReason::InvalidShippingForm,
                CheckoutError::InvalidShippingForm {
                    missing: validation.missing,
                },
            ));
        }

        self.transition(OrderPhase::Committing);

        let order = Order {
            id: OrderId::generate(),
            items: store.get_all().to_vec(),
            discount: self.totals(store.cart()).discount,
            created_at: Timestamp::now(),
        };

        if let Err(err) = self.commit(store, &order) {
            return Err(self.fail(FailureReason::StorageUnavailable, err));
        }

        self.promo.clear();
        self.transition(OrderPhase::Committed(order.id.clone()));

        info!(order_id = %order.id, items = order.items.len(), "order placed");

        self.notifier.notify(Advisory::OrderPlaced {
            id: order.id.to_string(),
        });

        Ok(order)
    }

    /// The receipt of the most recent order, if one is stored and readable.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn last_order(&self) -> Result<Option<Order>, StorageError> {
        read_json(&self.storage, LAST_ORDER_KEY)
    }

    fn commit<C: Storage>(
        &self,
        store: &mut CartStore<C>,
        order: &Order,
    ) -> Result<(), CheckoutError> {
        let previous = self.storage.get(LAST_ORDER_KEY)?;

        write_json(&self.storage, LAST_ORDER_KEY, order)?;

        if let Err(err) = store.clear() {
            let restored = match previous {
                Some(raw) => self.storage.set(LAST_ORDER_KEY, raw),
                None => self.storage.remove(LAST_ORDER_KEY),
            };

            if let Err(restore_err) = restored {
                error!(%restore_err, order_id = %order.id, "failed to restore previous receipt");
            }

            return Err(err.into());
        }

        Ok(())
    }

    fn fail(&mut self, reason: FailureReason, err: CheckoutError) -> CheckoutError {
        debug!(%err, "order placement failed");

        self.transition(OrderPhase::Failed(reason));

        err
    }

    fn transition(&mut self, next: OrderPhase) {
        debug!(from = ?self.phase, to = ?next, "order phase");

        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use testresult::TestResult;

    use crate::{
        items::ProductRef,
        notifications::RecordingNotifier,
        storage::{CART_KEY, MemoryStorage},
    };

    use super::*;

    fn filled_form() -> ShippingForm {
        ShippingForm {
            full_name: Some("Ayesha Khan".to_string()),
            phone: Some("0300 1234567".to_string()),
            address: Some("12 Mall Road".to_string()),
            city: Some("Lahore".to_string()),
            postal: Some("54000".to_string()),
        }
    }

    fn scarf(stock_limit: u32) -> ProductRef {
        ProductRef {
            id: "sku-1".to_string(),
            name: "Silk Scarf".to_string(),
            price: 2500,
            image: "img/scarf.jpg".to_string(),
            stock_limit,
        }
    }

    /// Fails `remove` once `armed` is set, leaving other operations intact.
    #[derive(Debug, Default)]
    struct FailingClear {
        inner: MemoryStorage,
        armed: Cell<bool>,
    }

    impl Storage for FailingClear {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.armed.get() && key == CART_KEY {
                return Err(StorageError::Unavailable("disk full".to_string()));
            }

            self.inner.remove(key)
        }
    }

    #[test]
    fn validation_reports_every_missing_field_in_order() {
        let form = ShippingForm {
            full_name: Some("  ".to_string()),
            address: Some("12 Mall Road".to_string()),
            postal: Some(String::new()),
            ..ShippingForm::default()
        };

        let validation = validate_shipping_form(&form);

        assert!(!validation.valid, "form should be invalid");
        assert_eq!(
            validation.missing,
            [
                ShippingField::FullName,
                ShippingField::Phone,
                ShippingField::City,
                ShippingField::Postal
            ]
        );
    }

    #[test]
    fn filled_form_is_valid() {
        let validation = validate_shipping_form(&filled_form());

        assert!(validation.valid, "form should be valid");
        assert!(validation.missing.is_empty());
    }

    #[test]
    fn shipping_form_reads_camel_case_fields() -> TestResult {
        let form: ShippingForm = serde_json::from_str(
            r#"{"fullName":"A","phone":"1","address":"x","city":"y","postal":"z"}"#,
        )?;

        assert!(validate_shipping_form(&form).valid, "form should be valid");

        Ok(())
    }

    #[test]
    fn invalid_form_error_lists_fields() {
        let err = CheckoutError::InvalidShippingForm {
            missing: vec![ShippingField::Phone, ShippingField::Postal],
        };

        assert_eq!(err.to_string(), "missing shipping fields: phone, postal");
    }

    #[test]
    fn totals_use_active_promo_and_shipping() -> TestResult {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage)?;
        let mut checkout = Checkout::new(
            &storage,
            CheckoutConfig {
                shipping_flat: 300,
                ..CheckoutConfig::default()
            },
        );

        store.add(&scarf(5))?;
        checkout.apply_promo(" luxe20 ")?;

        let totals = checkout.totals(store.cart());

        assert_eq!(
            totals,
            CheckoutTotals {
                subtotal: 2500,
                shipping: 300,
                discount: 2000,
                total: 800
            }
        );

        Ok(())
    }

    #[test]
    fn empty_cart_fails_without_side_effects() -> TestResult {
        let storage = MemoryStorage::new();
        let notifier = Rc::new(RecordingNotifier::new());
        let mut store = CartStore::open(&storage)?;
        let mut checkout =
            Checkout::with_notifier(&storage, CheckoutConfig::default(), notifier.clone());

        let result = checkout.place_order(&mut store, &filled_form());

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(storage.is_empty(), "nothing should be persisted");
        assert_eq!(checkout.phase(), &OrderPhase::Failed(FailureReason::EmptyCart));
        assert_eq!(notifier.last(), Some(Advisory::EmptyCart));

        Ok(())
    }

    #[test]
    fn incomplete_form_leaves_cart_untouched() -> TestResult {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage)?;
        let mut checkout = Checkout::new(&storage, CheckoutConfig::default());
        store.add(&scarf(5))?;

        let form = ShippingForm {
            city: None,
            ..filled_form()
        };

        let result = checkout.place_order(&mut store, &form);

        assert!(
            matches!(result, Err(CheckoutError::InvalidShippingForm { ref missing }) if missing == &[ShippingField::City]),
            "unexpected result: {result:?}"
        );
        assert_eq!(store.count(), 1);
        assert!(checkout.last_order()?.is_none());

        Ok(())
    }

    #[test]
    fn successful_order_writes_receipt_and_clears_cart() -> TestResult {
        let storage = MemoryStorage::new();
        let notifier = Rc::new(RecordingNotifier::new());
        let mut store = CartStore::open(&storage)?;
        let mut checkout =
            Checkout::with_notifier(&storage, CheckoutConfig::default(), notifier.clone());

        store.add(&scarf(5))?;
        store.add(&scarf(5))?;
        checkout.apply_promo("LUXE10")?;

        let order = checkout.place_order(&mut store, &filled_form())?;

        assert!(order.id.as_str().starts_with("ORD-"), "bad id {}", order.id);
        assert_eq!(order.discount, 1000);
        assert_eq!(order.items.len(), 1);
        assert!(store.get_all().is_empty());
        assert!(checkout.promo().is_none());
        assert_eq!(checkout.phase(), &OrderPhase::Committed(order.id.clone()));
        assert_eq!(checkout.last_order()?, Some(order.clone()));
        assert_eq!(
            notifier.last(),
            Some(Advisory::OrderPlaced {
                id: order.id.to_string()
            })
        );

        Ok(())
    }

    #[test]
    fn receipt_discount_is_capped_at_subtotal() -> TestResult {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage)?;
        let mut checkout = Checkout::new(&storage, CheckoutConfig::default());

        store.add(&ProductRef {
            price: 500,
            ..scarf(5)
        })?;
        checkout.apply_promo("LUXE20")?;

        let order = checkout.place_order(&mut store, &filled_form())?;

        assert_eq!(order.discount, 500);

        Ok(())
    }

    #[test]
    fn failed_clear_restores_previous_receipt() -> TestResult {
        let storage = FailingClear::default();
        let mut store = CartStore::open(&storage)?;
        let mut checkout = Checkout::new(&storage, CheckoutConfig::default());

        store.add(&scarf(5))?;
        let first = checkout.place_order(&mut store, &filled_form())?;

        store.add(&scarf(5))?;
        storage.armed.set(true);

        let result = checkout.place_order(&mut store, &filled_form());

        assert!(matches!(result, Err(CheckoutError::Store(_))));
        assert_eq!(checkout.last_order()?, Some(first));
        assert_eq!(store.count(), 1);
        assert_eq!(
            checkout.phase(),
            &OrderPhase::Failed(FailureReason::StorageUnavailable)
        );

        Ok(())
    }

    #[test]
    fn failed_clear_without_previous_receipt_removes_new_one() -> TestResult {
        let storage = FailingClear::default();
        let mut store = CartStore::open(&storage)?;
        let mut checkout = Checkout::new(&storage, CheckoutConfig::default());

        store.add(&scarf(5))?;
        storage.armed.set(true);

        let result = checkout.place_order(&mut store, &filled_form());

        assert!(result.is_err(), "order should fail");
        assert!(checkout.last_order()?.is_none());

        Ok(())
    }

    #[test]
    fn failed_attempt_can_be_retried() -> TestResult {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage)?;
        let mut checkout = Checkout::new(&storage, CheckoutConfig::default());

        let _empty = checkout.place_order(&mut store, &filled_form());

        store.add(&scarf(5))?;
        let order = checkout.place_order(&mut store, &filled_form())?;

        assert_eq!(checkout.phase(), &OrderPhase::Committed(order.id));

        Ok(())
    }

    #[test]
    fn corrupt_receipt_reads_as_absent() -> TestResult {
        let storage = MemoryStorage::new();
        storage.set(LAST_ORDER_KEY, "not json".to_string())?;

        let checkout = Checkout::new(&storage, CheckoutConfig::default());

        assert!(checkout.last_order()?.is_none());

        Ok(())
    }

    #[test]
    fn default_config_is_free_shipping_in_pkr() {
        let config = CheckoutConfig::default();

        assert_eq!(config.shipping_flat, 0);
        assert_eq!(config.currency, iso::PKR);
    }
}
