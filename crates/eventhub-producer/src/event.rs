//! Event bodies and size-bounded batches.

use crate::error::PublishError;

/// Largest payload Event Hubs accepts in a single send, in bytes.
pub const DEFAULT_MAX_BATCH_SIZE_BYTES: usize = 1_046_528;

/// A single event body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData {
    body: Vec<u8>,
}

impl EventData {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn size(&self) -> usize {
        self.body.len()
    }
}

impl From<String> for EventData {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}

impl From<&str> for EventData {
    fn from(body: &str) -> Self {
        Self::new(body.as_bytes())
    }
}

/// A bounded group of events submitted together in one send.
///
/// The batch tracks the total body size of its events and refuses any event
/// that would push it past `max_size_bytes`.
#[derive(Debug, Clone)]
pub struct EventBatch {
    events: Vec<EventData>,
    size_bytes: usize,
    max_size_bytes: usize,
}

impl EventBatch {
    pub fn new(max_size_bytes: usize) -> Self {
        Self {
            events: Vec::new(),
            size_bytes: 0,
            max_size_bytes,
        }
    }

    /// Append an event, failing with [`PublishError::CapacityExceeded`] if it
    /// does not fit. A rejected event leaves the batch unchanged.
    pub fn add(&mut self, event: EventData) -> Result<(), PublishError> {
        let event_size = event.size();
        if self.size_bytes + event_size > self.max_size_bytes {
            return Err(PublishError::CapacityExceeded {
                event_size,
                current_size: self.size_bytes,
                max_size: self.max_size_bytes,
            });
        }

        self.size_bytes += event_size;
        self.events.push(event);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    pub fn events(&self) -> &[EventData] {
        &self.events
    }

    pub fn into_events(self) -> Vec<EventData> {
        self.events
    }
}

impl Default for EventBatch {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BATCH_SIZE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tracks_size() {
        let mut batch = EventBatch::new(100);
        batch.add(EventData::from("{\"a\":1}")).unwrap();
        batch.add(EventData::from("{\"b\":22}")).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.size_bytes(), 15);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_add_fills_to_exact_limit() {
        let mut batch = EventBatch::new(10);
        batch.add(EventData::new(vec![b'x'; 10])).unwrap();
        assert_eq!(batch.size_bytes(), 10);
    }

    #[test]
    fn test_capacity_exceeded_leaves_batch_unchanged() {
        let mut batch = EventBatch::new(10);
        batch.add(EventData::new(vec![b'x'; 6])).unwrap();

        let err = batch.add(EventData::new(vec![b'y'; 5])).unwrap_err();
        match err {
            PublishError::CapacityExceeded {
                event_size,
                current_size,
                max_size,
            } => {
                assert_eq!(event_size, 5);
                assert_eq!(current_size, 6);
                assert_eq!(max_size, 10);
            }
            other => panic!("Expected CapacityExceeded, got {other:?}"),
        }

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.size_bytes(), 6);
    }

    #[test]
    fn test_default_batch_uses_event_hubs_limit() {
        let batch = EventBatch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.max_size_bytes(), DEFAULT_MAX_BATCH_SIZE_BYTES);
    }
}
