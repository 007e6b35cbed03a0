//! retail-stream library
//!
//! Publishes a steady stream of synthetic retail transactions to an Azure
//! Event Hub: 50 JSON events per batch, one batch per second, until
//! interrupted.
//!
//! # Crates
//!
//! - `transaction_generator` - the synthetic transaction model and random generator
//! - `eventhub_producer` - batches, connection strings, and the Kafka-endpoint producer
//!
//! # CLI Usage
//!
//! ```bash
//! export CONNECTION_STRING="Endpoint=sb://<namespace>.servicebus.windows.net/;SharedAccessKeyName=<name>;SharedAccessKey=<key>"
//! export TARGET_NAME="<event hub>"
//! retail-stream
//! ```

use anyhow::Context;
use eventhub_producer::{BatchPublisher, ConnectionString, EventHubProducer};
use tokio::sync::broadcast;
use transaction_generator::TransactionGenerator;

pub mod config;
pub mod stream;

pub use config::{ConfigError, StreamConfig, StreamOpts};
pub use stream::{StreamError, StreamMetrics, StreamRunner, EVENTS_PER_BATCH, SEND_INTERVAL};

/// Parse the connection string and create a producer for the target event hub.
///
/// Every configuration problem surfaces here, before any batch is built.
pub fn connect_event_hub(config: &StreamConfig) -> anyhow::Result<EventHubProducer> {
    let connection = ConnectionString::parse(&config.connection_string)
        .context("Failed to parse CONNECTION_STRING")?;

    let producer = EventHubProducer::connect(&connection, &config.target_name)
        .with_context(|| format!("Failed to create producer for '{}'", config.target_name))?;

    Ok(producer)
}

/// Stream freshly generated transactions through `publisher` until
/// `shutdown` fires or a send fails.
pub async fn stream_to_event_hub<P>(
    publisher: &P,
    shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<StreamMetrics>
where
    P: BatchPublisher + ?Sized,
{
    let metrics = StreamRunner::new(publisher, TransactionGenerator::new())
        .run(shutdown)
        .await?;

    Ok(metrics)
}
