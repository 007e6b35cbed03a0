//! Fixed value sets that synthetic transactions are drawn from.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of stores (`S001`..`S010`).
pub const STORE_COUNT: u32 = 10;

/// Number of products (`P0001`..`P0200`).
pub const PRODUCT_COUNT: u32 = 200;

/// Every payment type, in declaration order.
pub const PAYMENT_TYPES: [PaymentType; 3] =
    [PaymentType::Card, PaymentType::Cash, PaymentType::Online];

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Card,
    Cash,
    Online,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Card => "card",
            PaymentType::Cash => "cash",
            PaymentType::Online => "online",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a store identifier, e.g. `3` -> `S003`.
pub fn store_id(number: u32) -> String {
    format!("S{number:03}")
}

/// Format a product identifier, e.g. `42` -> `P0042`.
pub fn product_id(number: u32) -> String {
    format!("P{number:04}")
}

/// All store identifiers in order.
pub fn store_ids() -> Vec<String> {
    (1..=STORE_COUNT).map(store_id).collect()
}

/// All product identifiers in order.
pub fn product_ids() -> Vec<String> {
    (1..=PRODUCT_COUNT).map(product_id).collect()
}

/// Pick a store uniformly at random.
pub fn random_store_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    store_id(rng.gen_range(1..=STORE_COUNT))
}

/// Pick a product uniformly at random.
pub fn random_product_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    product_id(rng.gen_range(1..=PRODUCT_COUNT))
}

/// Pick a payment type uniformly at random.
pub fn random_payment_type<R: Rng + ?Sized>(rng: &mut R) -> PaymentType {
    PAYMENT_TYPES[rng.gen_range(0..PAYMENT_TYPES.len())]
}
