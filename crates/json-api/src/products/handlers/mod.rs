//! Product Handlers

pub(crate) mod create;
pub(crate) mod hot;
pub(crate) mod index;
