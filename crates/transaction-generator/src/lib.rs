//! Synthetic retail transaction generator for retail-stream.
//!
//! This crate produces the fake point-of-sale records that the stream
//! publishes. Every record is drawn independently from a fixed catalog of
//! stores, products and payment types; nothing is persisted and no record
//! refers to another.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ TransactionGenerator │
//! │                      │
//! │  - rng (StdRng)      │──── catalog (stores, products, payment types)
//! │  - id clock          │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!   SyntheticTransaction { transaction_id, datetime, store_id, ... }
//!            │
//!            ▼
//!        JSON text
//! ```
//!
//! # Example
//!
//! ```rust
//! use transaction_generator::TransactionGenerator;
//!
//! let mut generator = TransactionGenerator::new();
//! let txn = generator.next_transaction();
//! assert!(txn.transaction_id.starts_with("live-"));
//!
//! let json = txn.to_json().unwrap();
//! println!("{json}");
//! ```

pub mod catalog;
pub mod generator;
pub mod id;
pub mod transaction;

// Re-exports for convenience
pub use catalog::{PaymentType, PAYMENT_TYPES, PRODUCT_COUNT, STORE_COUNT};
pub use generator::{TransactionGenerator, TransactionIterator};
pub use id::{TransactionIdClock, TRANSACTION_ID_PREFIX};
pub use transaction::SyntheticTransaction;
