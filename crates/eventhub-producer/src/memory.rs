//! In-memory publisher that records batches instead of sending them.

use crate::error::PublishError;
use crate::event::{EventBatch, DEFAULT_MAX_BATCH_SIZE_BYTES};
use crate::publisher::BatchPublisher;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Publisher that keeps every sent batch in memory.
///
/// It can be told to fail a particular send attempt, which lets callers
/// exercise their error paths without a broker.
pub struct InMemoryPublisher {
    target_name: String,
    max_batch_size_bytes: usize,
    fail_on_attempt: Option<usize>,
    attempts: AtomicUsize,
    batches_created: AtomicUsize,
    sent: Mutex<Vec<EventBatch>>,
}

impl InMemoryPublisher {
    pub fn new(target_name: &str) -> Self {
        Self {
            target_name: target_name.to_string(),
            max_batch_size_bytes: DEFAULT_MAX_BATCH_SIZE_BYTES,
            fail_on_attempt: None,
            attempts: AtomicUsize::new(0),
            batches_created: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Make the `attempt`-th call to `send` (1-based) fail with a transport error.
    pub fn failing_on_attempt(mut self, attempt: usize) -> Self {
        self.fail_on_attempt = Some(attempt);
        self
    }

    /// Limit the size of batches handed out by `new_batch`.
    pub fn with_max_batch_size(mut self, max_batch_size_bytes: usize) -> Self {
        self.max_batch_size_bytes = max_batch_size_bytes;
        self
    }

    /// Number of times `send` was called, including failed calls.
    pub fn send_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Number of batches handed out by `new_batch`.
    pub fn batches_created(&self) -> usize {
        self.batches_created.load(Ordering::SeqCst)
    }

    /// Snapshot of every successfully sent batch, in send order.
    pub fn sent_batches(&self) -> Vec<EventBatch> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// Total number of successfully sent events.
    pub fn sent_event_count(&self) -> usize {
        self.sent
            .lock()
            .map(|sent| sent.iter().map(EventBatch::len).sum())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BatchPublisher for InMemoryPublisher {
    fn new_batch(&self) -> EventBatch {
        self.batches_created.fetch_add(1, Ordering::SeqCst);
        EventBatch::new(self.max_batch_size_bytes)
    }

    async fn send(&self, batch: EventBatch) -> Result<(), PublishError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if self.fail_on_attempt == Some(attempt) {
            return Err(PublishError::Transport(format!(
                "simulated failure on send attempt {attempt}"
            )));
        }

        self.sent
            .lock()
            .map_err(|e| PublishError::Transport(format!("publisher state poisoned: {e}")))?
            .push(batch);
        Ok(())
    }

    fn target_name(&self) -> &str {
        &self.target_name
    }
}
