//! Luxe
//!
//! Luxe is the storefront core of a small shop: a persisted, stock-aware cart,
//! checkout totals with promo codes, shipping validation and order placement.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod items;
pub mod money;
pub mod notifications;
pub mod orders;
pub mod pricing;
pub mod profile;
pub mod promotions;
pub mod session;
pub mod storage;
pub mod store;
