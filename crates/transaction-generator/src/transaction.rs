//! The synthetic transaction record.

use crate::catalog::PaymentType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text layout of the `datetime` field: ISO-8601, UTC, no offset suffix,
/// microsecond precision.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A fake retail sale.
///
/// Serializes to a flat JSON object with exactly seven fields. Consumers
/// must look fields up by name; ordering is not part of the format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticTransaction {
    pub transaction_id: String,
    pub datetime: String,
    pub store_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub payment_type: PaymentType,
}

impl SyntheticTransaction {
    /// Format a generation timestamp the way the `datetime` field carries it.
    pub fn format_datetime(at: DateTime<Utc>) -> String {
        at.naive_utc().format(DATETIME_FORMAT).to_string()
    }

    /// Serialize to a JSON text object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
