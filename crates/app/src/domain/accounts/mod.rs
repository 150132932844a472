//! Accounts

pub mod data;
pub mod errors;
pub mod models;
pub mod passwords;
mod repository;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;
