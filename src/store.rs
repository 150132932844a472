//! Cart Store
//!
//! The single writer for a session's cart. Every mutation works on a copy of
//! the current cart, persists it, and only then replaces the in-memory state
//! and notifies subscribers. A failed write therefore leaves both the store
//! and the persisted cart exactly as they were.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    items::{LineItem, ProductRef},
    notifications::{Advisory, Notifier, TracingNotifier},
    storage::{CART_KEY, Storage, StorageError, read_json, write_json},
};

/// Errors returned by cart mutations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// No more units of the product can be added.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// The product id is not in the cart.
    #[error("item {0} not found in cart")]
    ItemNotFound(String),

    /// Persisting the cart failed; the previous state is kept.
    #[error("cart storage unavailable")]
    Storage(#[from] StorageError),
}

/// Snapshot passed to subscribers after every successful mutation.
#[derive(Debug, Clone, Copy)]
pub struct CartChange<'a> {
    /// Sum of quantities, for badge rendering.
    pub count: u64,

    /// Items in display order.
    pub items: &'a [LineItem],
}

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityChange {
    /// Quantity the caller asked for.
    pub requested: i64,

    /// Quantity actually applied.
    pub qty: u32,

    /// Whether the stock ceiling reduced the request.
    pub limit_reached: bool,
}

type Subscriber = Box<dyn FnMut(&CartChange<'_>)>;

/// Cart state for one client session.
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
    notifier: Box<dyn Notifier>,
    subscribers: Vec<Subscriber>,
}

impl<S: Debug> Debug for CartStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<S: Storage> CartStore<S> {
    /// Open the cart persisted in `storage`, logging advisories via `tracing`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read. Missing or
    /// corrupt state is not an error and yields an empty cart.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        Self::with_notifier(storage, TracingNotifier)
    }

    /// Open the cart persisted in `storage`, sending advisories to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn with_notifier(
        storage: S,
        notifier: impl Notifier + 'static,
    ) -> Result<Self, StorageError> {
        let cart = load_cart(&storage)?;

        Ok(Self {
            storage,
            cart,
            notifier: Box::new(notifier),
            subscribers: Vec::new(),
        })
    }

    /// Re-read the persisted cart, replacing the in-memory copy.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        self.cart = load_cart(&self.storage)?;

        Ok(())
    }

    /// Register a callback invoked after every successful mutation.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CartChange<'_>) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Add one unit of `product`.
    ///
    /// An existing line is incremented only while `stock_limit` is zero or
    /// above the current quantity, and its ceiling is refreshed to
    /// `stock_limit`. A new line requires a positive `stock_limit`.
    ///
    /// Returns the new item count.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::OutOfStock`]: the ceiling has been reached.
    /// - [`CartStoreError::Storage`]: the cart could not be persisted.
    pub fn add(&mut self, product: &ProductRef) -> Result<u64, CartStoreError> {
        let mut next = self.cart.clone();

        if let Some(existing) = next.get_mut(&product.id) {
            if product.stock_limit != 0 && existing.qty >= product.stock_limit {
                return Err(self.out_of_stock(product));
            }

            existing.qty = existing.qty.saturating_add(1);
            existing.max_qty = product.stock_limit;
        } else {
            if product.stock_limit == 0 {
                return Err(self.out_of_stock(product));
            }

            next.push(LineItem::from_product(product));
        }

        self.commit(next)?;

        self.notifier.notify(Advisory::ItemAdded {
            name: product.name.clone(),
        });

        Ok(self.cart.count())
    }

    /// Remove the line for `id`, returning it.
    ///
    /// Removing an id that is not in the cart does nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the cart could not be persisted.
    pub fn remove(&mut self, id: &str) -> Result<Option<LineItem>, CartStoreError> {
        let mut next = self.cart.clone();

        let Some(removed) = next.remove(id) else {
            debug!(id, "ignoring removal of item not in cart");

            return Ok(None);
        };

        self.commit(next)?;

        Ok(Some(removed))
    }

    /// Set the quantity of `id` to `requested`, clamped to `1..=max_qty`
    /// (or `1..` when the item has no known ceiling).
    ///
    /// When the ceiling reduces the request a
    /// [`Advisory::StockLimitReached`] is posted and the clamped value is
    /// still applied.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::ItemNotFound`]: `id` is not in the cart.
    /// - [`CartStoreError::Storage`]: the cart could not be persisted.
    pub fn set_quantity(
        &mut self,
        id: &str,
        requested: i64,
    ) -> Result<QuantityChange, CartStoreError> {
        let mut next = self.cart.clone();

        let item = next
            .get_mut(id)
            .ok_or_else(|| CartStoreError::ItemNotFound(id.to_string()))?;

        let change = clamp_quantity(requested, item.max_qty);
        let name = item.name.clone();

        item.qty = change.qty;

        self.commit(next)?;

        if change.limit_reached {
            self.notifier.notify(Advisory::StockLimitReached {
                name,
                max_qty: change.qty,
            });
        }

        Ok(change)
    }

    /// Raise the quantity of `id` by one, respecting its ceiling.
    ///
    /// # Errors
    ///
    /// See [`CartStore::set_quantity`].
    pub fn increment(&mut self, id: &str) -> Result<QuantityChange, CartStoreError> {
        let current = self.current_qty(id)?;

        self.set_quantity(id, current.saturating_add(1))
    }

    /// Lower the quantity of `id` by one, never below one.
    ///
    /// # Errors
    ///
    /// See [`CartStore::set_quantity`].
    pub fn decrement(&mut self, id: &str) -> Result<QuantityChange, CartStoreError> {
        let current = self.current_qty(id)?;

        self.set_quantity(id, current.saturating_sub(1))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the persisted cart could not be removed.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.storage.remove(CART_KEY)?;

        self.cart = Cart::new();
        self.publish();

        Ok(())
    }

    /// Items in display order.
    pub fn get_all(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of quantities across all items.
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// The backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn current_qty(&self, id: &str) -> Result<i64, CartStoreError> {
        self.cart
            .get(id)
            .map(|item| i64::from(item.qty))
            .ok_or_else(|| CartStoreError::ItemNotFound(id.to_string()))
    }

    fn out_of_stock(&self, product: &ProductRef) -> CartStoreError {
        self.notifier.notify(Advisory::OutOfStock {
            name: product.name.clone(),
        });

        CartStoreError::OutOfStock(product.id.clone())
    }

    fn commit(&mut self, next: Cart) -> Result<(), StorageError> {
        write_json(&self.storage, CART_KEY, &next)?;

        self.cart = next;
        self.publish();

        Ok(())
    }

    fn publish(&mut self) {
        let change = CartChange {
            count: self.cart.count(),
            items: self.cart.items(),
        };

        for subscriber in &mut self.subscribers {
            subscriber(&change);
        }
    }
}

fn load_cart(storage: &impl Storage) -> Result<Cart, StorageError> {
    let Some(cart) = read_json::<Cart>(storage, CART_KEY)? else {
        return Ok(Cart::new());
    };

    match cart.validate() {
        Ok(()) => Ok(cart),
        Err(error) => {
            warn!(%error, "discarding persisted cart that breaks cart invariants");

            Ok(Cart::new())
        }
    }
}

/// Clamp `requested` to `max(1, min(requested, ceiling))`. A zero `max_qty`
/// means no known stock ceiling, leaving `u32::MAX` as the only bound.
pub fn clamp_quantity(requested: i64, max_qty: u32) -> QuantityChange {
    let ceiling = if max_qty > 0 { max_qty } else { u32::MAX };

    let clamped = requested.clamp(1, i64::from(ceiling));

    QuantityChange {
        requested,
        qty: u32::try_from(clamped).unwrap_or(ceiling),
        limit_reached: requested > i64::from(ceiling),
    }
}
