//! The publish loop.
//!
//! Each iteration opens a batch, fills it with exactly
//! [`EVENTS_PER_BATCH`] freshly generated transactions, sends it, and then
//! sleeps for [`SEND_INTERVAL`]. The sleep follows the send, so the real
//! rate is `EVENTS_PER_BATCH / (send latency + SEND_INTERVAL)`.
//!
//! A send that is in flight always completes. The shutdown signal is
//! observed at the iteration boundary and cuts the sleep short.

use eventhub_producer::{BatchPublisher, EventData, PublishError};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, info};
use transaction_generator::TransactionGenerator;

/// Number of transactions in every batch.
pub const EVENTS_PER_BATCH: usize = 50;

/// Pause after every send.
pub const SEND_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that end the stream.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Failed to publish batch {batch}: {source}")]
    Publish {
        batch: u64,
        #[source]
        source: PublishError,
    },

    #[error("Failed to serialize transaction: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Counters for a stream run.
#[derive(Debug, Clone, Default)]
pub struct StreamMetrics {
    /// Number of batches sent.
    pub batches_sent: u64,
    /// Number of events sent.
    pub events_sent: u64,
    /// Time from start to stop.
    pub total_duration: Duration,
}

impl StreamMetrics {
    /// Calculate events per second.
    pub fn events_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.events_sent as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Drives the generate / batch / send / sleep cycle against a publisher.
pub struct StreamRunner<'a, P: ?Sized, R> {
    publisher: &'a P,
    generator: TransactionGenerator<R>,
    max_batches: Option<u64>,
}

impl<'a, P, R> StreamRunner<'a, P, R>
where
    P: BatchPublisher + ?Sized,
    R: Rng,
{
    pub fn new(publisher: &'a P, generator: TransactionGenerator<R>) -> Self {
        Self {
            publisher,
            generator,
            max_batches: None,
        }
    }

    /// Stop on its own after sending this many batches.
    ///
    /// The binary never sets a limit and streams until Ctrl+C. This is for
    /// embedders that want a bounded run, such as a smoke test against a
    /// real namespace, and for the loop tests in `tests/stream_loop.rs`.
    pub fn with_max_batches(mut self, max_batches: u64) -> Self {
        self.max_batches = Some(max_batches);
        self
    }

    /// Run until a shutdown signal arrives, the batch limit is reached, or a
    /// send fails.
    ///
    /// A failed send is returned immediately; no further batch is attempted.
    pub async fn run(
        mut self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<StreamMetrics, StreamError> {
        let start = Instant::now();
        let mut metrics = StreamMetrics::default();

        info!(
            "Streaming {} transactions every {:?} to '{}'",
            EVENTS_PER_BATCH,
            SEND_INTERVAL,
            self.publisher.target_name()
        );

        loop {
            let batch_number = metrics.batches_sent + 1;
            let sent = self.publish_one(batch_number).await?;

            metrics.batches_sent += 1;
            metrics.events_sent += sent as u64;

            debug!(
                "Batch {} sent: {} events ({} total)",
                batch_number, sent, metrics.events_sent
            );

            if self
                .max_batches
                .is_some_and(|max| metrics.batches_sent >= max)
            {
                info!("Reached batch limit of {}", metrics.batches_sent);
                break;
            }

            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(SEND_INTERVAL) => {}
            }
        }

        metrics.total_duration = start.elapsed();

        info!(
            "Stream stopped: {} events in {} batches over {:?} ({:.2} events/sec)",
            metrics.events_sent,
            metrics.batches_sent,
            metrics.total_duration,
            metrics.events_per_second()
        );

        Ok(metrics)
    }

    /// Build one batch of fresh transactions and send it.
    async fn publish_one(&mut self, batch_number: u64) -> Result<usize, StreamError> {
        let publish_error = |source| StreamError::Publish {
            batch: batch_number,
            source,
        };

        let mut batch = self.publisher.new_batch();
        for transaction in self.generator.transactions(EVENTS_PER_BATCH) {
            let body = transaction.to_json()?;
            batch.add(EventData::from(body)).map_err(publish_error)?;
        }

        let count = batch.len();
        self.publisher.send(batch).await.map_err(publish_error)?;
        Ok(count)
    }
}
