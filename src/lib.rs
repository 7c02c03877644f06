//! Typed Rust client for sending text messages through the WhatsApp Cloud API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! the Graph API wire format, and a small client layer that issues the request
//! and maps the response to a [`SendResult`] or a [`WhatsAppError`].
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use wacloud::{ClientConfig, WhatsAppClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wacloud::WhatsAppError> {
//!     let client = WhatsAppClient::new(ClientConfig::new("v21.0", "1234567890", "..."))?;
//!     let result = client
//!         .send_text_message("15551234567", "hello", &CancellationToken::new())
//!         .await?;
//!     println!("{:?}", result.first_message_id());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Cancelled, ClientConfig, DEFAULT_TIMEOUT, WhatsAppClient, WhatsAppError};
pub use domain::{
    AccessToken, ApiErrorCode, ApiErrorDetails, ApiVersion, BaseUrl, Contact, KnownApiErrorCode,
    PhoneNumberId, SendResult, SentMessage, TextMessage, ValidationError,
};
