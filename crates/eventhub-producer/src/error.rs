//! Error types for Event Hubs publishing.

use thiserror::Error;

/// Errors raised while parsing an Event Hubs connection string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("Connection string segment is not of the form Key=Value: {0}")]
    MalformedSegment(String),

    #[error("Connection string is missing required key: {0}")]
    MissingKey(&'static str),

    #[error("Endpoint must use the sb:// scheme: {0}")]
    InvalidEndpoint(String),

    #[error("EntityPath '{entity_path}' does not match target name '{target_name}'")]
    EntityPathMismatch {
        entity_path: String,
        target_name: String,
    },
}

/// Errors that can occur while batching or sending events.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Event of {event_size} bytes does not fit in batch ({current_size}/{max_size} bytes used)")]
    CapacityExceeded {
        event_size: usize,
        current_size: usize,
        max_size: usize,
    },

    #[error("Invalid connection string: {0}")]
    ConnectionString(#[from] ConnectionStringError),

    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Transport error: {0}")]
    Transport(String),
}
