//! Luxe Domain Concerns

pub mod accounts;
pub mod products;
