//! Command-line interface for retail-stream
//!
//! # Usage
//! ```bash
//! CONNECTION_STRING="Endpoint=sb://contoso.servicebus.windows.net/;SharedAccessKeyName=send;SharedAccessKey=..." \
//! TARGET_NAME=sales \
//!   retail-stream
//! ```
//!
//! Exit status is 0 after Ctrl+C and 1 when configuration is missing or a
//! send fails.

use clap::Parser;
use retail_stream::{connect_event_hub, stream_to_event_hub, StreamConfig, StreamOpts};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "retail-stream")]
#[command(version)]
#[command(about = "Publish synthetic retail transactions to an Azure Event Hub")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: StreamOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = StreamConfig::try_from(&cli.opts)?;
    let producer = connect_event_hub(&config)?;

    let shutdown = setup_shutdown_handler();

    println!("Sending events. Ctrl+C to stop.");
    let metrics = stream_to_event_hub(&producer, shutdown).await?;
    println!("Stopped.");

    info!(
        "Sent {} events in {} batches",
        metrics.events_sent, metrics.batches_sent
    );
    Ok(())
}

/// Sets up a shutdown signal handler
fn setup_shutdown_handler() -> tokio::sync::broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received interrupt signal (Ctrl+C)");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                // Dropping the sender would read as a shutdown request.
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    });

    shutdown_rx
}
