//! Event Hubs publisher backed by the namespace's Kafka endpoint.
//!
//! Every Event Hubs namespace (Standard tier and above, and the local
//! emulator) speaks the Kafka protocol. The event hub is the topic, and the
//! connection string itself is the SASL PLAIN password.

use crate::connection_string::{ConnectionString, SASL_CONNECTION_STRING_USERNAME};
use crate::error::PublishError;
use crate::event::{EventBatch, EventData, DEFAULT_MAX_BATCH_SIZE_BYTES};
use crate::publisher::BatchPublisher;
use async_trait::async_trait;
use rdkafka::producer::{DeliveryFuture, FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use tracing::{debug, info};

/// How long librdkafka may keep trying to deliver one event, in milliseconds.
pub const MESSAGE_TIMEOUT_MS: u32 = 30_000;

/// Build the librdkafka configuration for an Event Hubs namespace.
pub fn client_config(connection: &ConnectionString) -> ClientConfig {
    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", connection.kafka_bootstrap_servers())
        .set("security.protocol", connection.kafka_security_protocol())
        .set("sasl.mechanism", "PLAIN")
        .set("sasl.username", SASL_CONNECTION_STRING_USERNAME)
        .set("sasl.password", connection.as_str())
        .set("client.id", "retail-stream")
        .set("message.timeout.ms", MESSAGE_TIMEOUT_MS.to_string())
        .set("request.timeout.ms", "60000")
        .set("metadata.max.age.ms", "180000")
        .set("socket.keepalive.enable", "true")
        .set("message.max.bytes", DEFAULT_MAX_BATCH_SIZE_BYTES.to_string())
        .set("linger.ms", "5");
    config
}

/// Publisher that sends batches to one event hub.
pub struct EventHubProducer {
    producer: FutureProducer,
    target_name: String,
    max_batch_size_bytes: usize,
}

impl EventHubProducer {
    /// Create a producer for `target_name` on the namespace described by
    /// `connection`.
    ///
    /// No network traffic happens here; librdkafka connects lazily on the
    /// first send.
    pub fn connect(
        connection: &ConnectionString,
        target_name: &str,
    ) -> Result<Self, PublishError> {
        connection.check_target(target_name)?;

        let producer = Self::with_client_config(client_config(connection), target_name)?;

        info!(
            "Created Event Hubs producer for '{}' via {} ({})",
            target_name,
            connection.kafka_bootstrap_servers(),
            connection.kafka_security_protocol()
        );

        Ok(producer)
    }

    fn with_client_config(config: ClientConfig, target_name: &str) -> Result<Self, PublishError> {
        let producer: FutureProducer = config.create()?;

        Ok(Self {
            producer,
            target_name: target_name.to_string(),
            max_batch_size_bytes: DEFAULT_MAX_BATCH_SIZE_BYTES,
        })
    }

    /// Hand every event to librdkafka's queue without waiting for delivery.
    fn enqueue(&self, events: &[EventData]) -> Result<Vec<DeliveryFuture>, PublishError> {
        let mut deliveries = Vec::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            let record = FutureRecord::<(), [u8]>::to(&self.target_name).payload(event.body());
            let delivery = self.producer.send_result(record).map_err(|(err, _)| {
                PublishError::Transport(format!(
                    "failed to enqueue event {} of {} for '{}': {err}",
                    index + 1,
                    events.len(),
                    self.target_name
                ))
            })?;
            deliveries.push(delivery);
        }
        Ok(deliveries)
    }
}

#[async_trait]
impl BatchPublisher for EventHubProducer {
    fn new_batch(&self) -> EventBatch {
        EventBatch::new(self.max_batch_size_bytes)
    }

    async fn send(&self, batch: EventBatch) -> Result<(), PublishError> {
        let events = batch.into_events();

        // The whole batch is queued before the first await, so librdkafka
        // packs it into as few produce requests as it can.
        let deliveries = self.enqueue(&events)?;

        let mut delivered = 0usize;
        for delivery in deliveries {
            match delivery.await {
                Ok(Ok(_)) => delivered += 1,
                Ok(Err((err, _))) => {
                    return Err(PublishError::Transport(format!(
                        "delivery to '{}' failed after {delivered} of {} events: {err}",
                        self.target_name,
                        events.len()
                    )));
                }
                Err(_) => {
                    return Err(PublishError::Transport(format!(
                        "delivery report for '{}' was dropped after {delivered} of {} events",
                        self.target_name,
                        events.len()
                    )));
                }
            }
        }

        debug!("Delivered {} events to '{}'", delivered, self.target_name);
        Ok(())
    }

    fn target_name(&self) -> &str {
        &self.target_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdkafka::producer::{Producer, PurgeConfig};

    const EMULATOR: &str = "Endpoint=sb://localhost;SharedAccessKeyName=RootManageSharedAccessKey;SharedAccessKey=SAS_KEY_VALUE;UseDevelopmentEmulator=true;";

    const CONN: &str = "Endpoint=sb://contoso.servicebus.windows.net/;SharedAccessKeyName=send;SharedAccessKey=secret=";

    #[test]
    fn test_client_config_for_namespace() {
        let connection = ConnectionString::parse(CONN).unwrap();
        let config = client_config(&connection);

        assert_eq!(
            config.get("bootstrap.servers"),
            Some("contoso.servicebus.windows.net:9093")
        );
        assert_eq!(config.get("security.protocol"), Some("SASL_SSL"));
        assert_eq!(config.get("sasl.mechanism"), Some("PLAIN"));
        assert_eq!(config.get("sasl.username"), Some("$ConnectionString"));
        assert_eq!(config.get("sasl.password"), Some(CONN));
        assert_eq!(config.get("message.max.bytes"), Some("1046528"));
    }

    #[test]
    fn test_client_config_for_emulator() {
        let connection = ConnectionString::parse(EMULATOR).unwrap();
        let config = client_config(&connection);

        assert_eq!(config.get("bootstrap.servers"), Some("localhost:9092"));
        assert_eq!(config.get("security.protocol"), Some("SASL_PLAINTEXT"));
    }

    #[test]
    fn test_connect_rejects_mismatched_entity_path() {
        let connection = ConnectionString::parse(&format!("{CONN};EntityPath=sales")).unwrap();
        let result = EventHubProducer::connect(&connection, "returns");
        assert!(matches!(result, Err(PublishError::ConnectionString(_))));
    }

    #[test]
    fn test_enqueue_queues_whole_batch_before_any_delivery() {
        let connection = ConnectionString::parse(EMULATOR).unwrap();
        let mut config = client_config(&connection);
        // Nothing listens here, so nothing can be delivered during the test.
        config.set("bootstrap.servers", "127.0.0.1:1");
        let producer = EventHubProducer::with_client_config(config, "sales").unwrap();

        let mut batch = producer.new_batch();
        for i in 0..50 {
            batch.add(EventData::from(format!("{{\"n\":{i}}}"))).unwrap();
        }

        let deliveries = producer.enqueue(batch.events()).unwrap();

        assert_eq!(deliveries.len(), 50);
        assert_eq!(producer.producer.in_flight_count(), 50);

        producer
            .producer
            .purge(PurgeConfig::default().queue().inflight());
    }
}
