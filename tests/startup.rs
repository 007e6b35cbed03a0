//! Producer setup happens before streaming starts.

use eventhub_producer::{BatchPublisher, InMemoryPublisher};
use retail_stream::{connect_event_hub, stream_to_event_hub, StreamConfig, EVENTS_PER_BATCH};
use tokio::sync::broadcast;

const EMULATOR: &str = "Endpoint=sb://localhost;SharedAccessKeyName=RootManageSharedAccessKey;SharedAccessKey=SAS_KEY_VALUE;UseDevelopmentEmulator=true;";

#[test]
fn test_unparseable_connection_string_fails_to_connect() {
    let config = StreamConfig::new("not a connection string", "sales").unwrap();

    let Err(err) = connect_event_hub(&config) else {
        panic!("Expected an unparseable connection string to be rejected");
    };
    assert!(format!("{err:#}").contains("Failed to parse CONNECTION_STRING"));
}

#[test]
fn test_entity_path_mismatch_fails_to_connect() {
    let config = StreamConfig::new(&format!("{EMULATOR}EntityPath=returns"), "sales").unwrap();

    let Err(err) = connect_event_hub(&config) else {
        panic!("Expected a mismatched EntityPath to be rejected");
    };
    assert!(format!("{err:#}").contains("Failed to create producer for 'sales'"));
}

#[test]
fn test_valid_configuration_connects_without_sending() {
    let config = StreamConfig::new(EMULATOR, "sales").unwrap();

    let producer = connect_event_hub(&config).unwrap();
    assert_eq!(producer.target_name(), "sales");
}

#[tokio::test(start_paused = true)]
async fn test_stream_stops_on_shutdown() {
    let publisher = InMemoryPublisher::new("sales");
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    shutdown_tx.send(()).unwrap();

    let metrics = stream_to_event_hub(&publisher, shutdown_rx).await.unwrap();

    assert_eq!(metrics.batches_sent, 1);
    assert_eq!(publisher.sent_event_count(), EVENTS_PER_BATCH);
}
