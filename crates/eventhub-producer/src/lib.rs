//! Batched Event Hubs publishing for retail-stream.
//!
//! This library wraps the Event Hubs Kafka-compatible endpoint behind a
//! narrow [`BatchPublisher`] trait: hand out an empty [`EventBatch`], fill
//! it with [`EventData`], send it in one call.
//!
//! ## Features
//!
//! - **Connection strings**: parse `Endpoint=sb://...;SharedAccessKeyName=...`
//!   strings into Kafka bootstrap and SASL settings
//! - **Kafka producer**: [`EventHubProducer`] sends each batch and waits for
//!   every delivery report
//! - **In-memory publisher**: [`InMemoryPublisher`] records batches for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eventhub_producer::{BatchPublisher, ConnectionString, EventData, EventHubProducer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let connection = ConnectionString::parse(
//!         "Endpoint=sb://contoso.servicebus.windows.net/;SharedAccessKeyName=send;SharedAccessKey=...",
//!     )?;
//!     let producer = EventHubProducer::connect(&connection, "sales")?;
//!
//!     let mut batch = producer.new_batch();
//!     batch.add(EventData::from(r#"{"hello":"world"}"#))?;
//!     producer.send(batch).await?;
//!     Ok(())
//! }
//! ```

pub mod connection_string;
pub mod error;
pub mod event;
pub mod memory;
pub mod producer;
pub mod publisher;

// Re-exports for convenience
pub use connection_string::ConnectionString;
pub use error::{ConnectionStringError, PublishError};
pub use event::{EventBatch, EventData, DEFAULT_MAX_BATCH_SIZE_BYTES};
pub use memory::InMemoryPublisher;
pub use producer::{EventHubProducer, MESSAGE_TIMEOUT_MS};
pub use publisher::BatchPublisher;
