//! Send one WhatsApp text message using environment configuration.
//!
//! Required: `WHATSAPP_API_VERSION`, `WHATSAPP_PHONE_NUMBER_ID`, `WHATSAPP_TOKEN`,
//! `WHATSAPP_RECIPIENT_NUMBER`. Optional: `WHATSAPP_MESSAGE_BODY`, `RUST_LOG`.
//! A `.env` file in the working directory is loaded first if present.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wacloud::{ClientConfig, WhatsAppClient};

const DEFAULT_MESSAGE_BODY: &str = "Hello from Rust via WhatsApp Cloud API!";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const SEND_DEADLINE: Duration = Duration::from_secs(20);

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::new(
        env_or_empty("WHATSAPP_API_VERSION"),
        env_or_empty("WHATSAPP_PHONE_NUMBER_ID"),
        env_or_empty("WHATSAPP_TOKEN"),
    )
    .timeout(REQUEST_TIMEOUT);

    let client = WhatsAppClient::new(config)
        .map_err(|err| format!("failed to initialize client: {err}"))?;

    let recipient = env_or_empty("WHATSAPP_RECIPIENT_NUMBER");
    if recipient.is_empty() {
        return Err("recipient number is required".into());
    }

    let body = std::env::var("WHATSAPP_MESSAGE_BODY")
        .ok()
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| DEFAULT_MESSAGE_BODY.to_owned());

    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    let timer = tokio::spawn(async move {
        tokio::time::sleep(SEND_DEADLINE).await;
        deadline.cancel();
    });

    let result = client.send_text_message(recipient, body, &cancel).await;
    timer.abort();
    let result = result.map_err(|err| format!("failed to send message: {err}"))?;

    match result.first_message_id() {
        Some(id) => info!(id, "message sent successfully"),
        None => info!("message sent successfully"),
    }

    Ok(())
}

fn env_or_empty(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
