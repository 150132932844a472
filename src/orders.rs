//! Orders

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};

use crate::items::LineItem;

/// Opaque order token, `ORD-` followed by six upper-case alphanumerics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    const PREFIX: &'static str = "ORD-";
    const SUFFIX_LEN: usize = 6;

    /// Generate a fresh id from the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate a fresh id from `rng`.
    pub fn generate_with(rng: &mut impl Rng) -> Self {
        let suffix: String = rng
            .sample_iter(&Alphanumeric)
            .take(Self::SUFFIX_LEN)
            .map(|byte| char::from(byte).to_ascii_uppercase())
            .collect();

        Self(format!("{}{suffix}", Self::PREFIX))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Immutable record of a placed order, persisted as the last-order receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order token.
    pub id: OrderId,

    /// Cart snapshot at placement time.
    pub items: Vec<LineItem>,

    /// Discount applied, in minor units.
    pub discount: u64,

    /// Placement time.
    pub created_at: Timestamp,
}
