//! The batched publish seam.

use crate::error::PublishError;
use crate::event::EventBatch;
use async_trait::async_trait;

/// A client that accepts batches of events for one destination.
///
/// Implementations hand out empty batches sized for their transport and send
/// a filled batch as a single operation: `send` returns `Ok` only once every
/// event in the batch has been accepted.
#[async_trait]
pub trait BatchPublisher: Send + Sync {
    /// Open a new empty batch bounded by the transport's size limit.
    fn new_batch(&self) -> EventBatch;

    /// Submit a batch.
    async fn send(&self, batch: EventBatch) -> Result<(), PublishError>;

    /// Name of the destination this publisher sends to.
    fn target_name(&self) -> &str;
}
