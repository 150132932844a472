//! Account Handlers

pub(crate) mod login;
pub(crate) mod register;
