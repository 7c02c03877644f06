//! Client layer: validates configuration, orchestrates the transport call and maps
//! wire responses to domain results or typed errors.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{
    AccessToken, ApiErrorDetails, ApiVersion, BaseUrl, PhoneNumberId, SendResult, TextMessage,
    ValidationError,
};

/// Timeout applied to the default HTTP client when none (or zero) is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

#[derive(Debug)]
enum HttpFailure {
    Build(BoxError),
    Send(BoxError),
}

impl From<HttpFailure> for WhatsAppError {
    fn from(value: HttpFailure) -> Self {
        match value {
            HttpFailure::Build(err) => Self::BuildRequest(err),
            HttpFailure::Send(err) => Self::SendRequest(err),
        }
    }
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        token: &'a AccessToken,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpFailure>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        token: &'a AccessToken,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpFailure>> {
        Box::pin(async move {
            let request = self
                .client
                .post(url)
                .bearer_auth(token.as_str())
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .build()
                .map_err(|err| HttpFailure::Build(Box::new(err)))?;

            let response = self
                .client
                .execute(request)
                .await
                .map_err(|err| HttpFailure::Send(Box::new(err)))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|err| HttpFailure::Send(Box::new(err)))?;
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
/// Source of [`WhatsAppError::SendRequest`] when the caller's token fired first.
#[error("request cancelled before a response was received")]
pub struct Cancelled;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`WhatsAppClient`].
///
/// Every variant has a stable machine-readable [`code`](WhatsAppError::code); lower-level
/// causes are kept as the error source.
pub enum WhatsAppError {
    /// A required configuration value is missing or malformed.
    #[error("invalid configuration supplied: {0}")]
    InvalidConfig(#[from] ValidationError),

    /// The request could not be encoded or a success body could not be decoded.
    #[error("failed to marshal request payload: {0}")]
    Marshal(#[source] serde_json::Error),

    /// The HTTP request (or the HTTP client) could not be constructed.
    #[error("failed to build HTTP request: {0}")]
    BuildRequest(#[source] BoxError),

    /// Network failure, timeout, or cancellation before a full response arrived.
    #[error("failed to send HTTP request: {0}")]
    SendRequest(#[source] BoxError),

    /// The API answered with HTTP status >= 400.
    #[error(
        "received error response from WhatsApp Cloud API{}",
        detail_suffix(.detail.as_deref())
    )]
    ApiResponse {
        status: u16,
        /// `error.message`, with `(error_data.details)` appended when present, or the
        /// decode failure when the envelope could not be parsed.
        detail: Option<String>,
        error: Option<ApiErrorDetails>,
        #[source]
        source: Option<serde_json::Error>,
    },
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|detail| format!(": {detail}")).unwrap_or_default()
}

impl WhatsAppError {
    /// Stable error code, suitable for metrics labels or matching across versions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "invalid_config_error",
            Self::Marshal(_) => "marshal_request_error",
            Self::BuildRequest(_) => "build_request_error",
            Self::SendRequest(_) => "send_request_error",
            Self::ApiResponse { .. } => "api_response_error",
        }
    }

    /// Whether this error was caused by the caller's [`CancellationToken`].
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::SendRequest(err) => err.is::<Cancelled>(),
            _ => false,
        }
    }
}

#[derive(Clone, Default)]
/// Settings for [`WhatsAppClient::new`].
///
/// `api_version`, `phone_number_id` and `token` are required; the rest fall back to
/// `https://graph.facebook.com` and a 10 second timeout. When `http_client` is set it is
/// used as-is and `timeout` is ignored.
pub struct ClientConfig {
    pub api_version: String,
    pub phone_number_id: String,
    pub token: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Create a config with the three required values and defaults for the rest.
    pub fn new(
        api_version: impl Into<String>,
        phone_number_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            phone_number_id: phone_number_id.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// Override the Graph API root (useful for proxies and tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout applied to the whole HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a pre-configured `reqwest::Client` instead of building one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_version", &self.api_version)
            .field("phone_number_id", &self.phone_number_id)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

fn effective_timeout(timeout: Option<Duration>) -> Duration {
    match timeout {
        Some(timeout) if !timeout.is_zero() => timeout,
        _ => DEFAULT_TIMEOUT,
    }
}

#[derive(Clone)]
/// WhatsApp Cloud API client for plain text messages.
///
/// The handle is immutable after construction; clone it (or share it behind a reference)
/// across tasks. Clones reuse the same connection pool.
pub struct WhatsAppClient {
    api_version: ApiVersion,
    phone_number_id: PhoneNumberId,
    token: AccessToken,
    base_url: BaseUrl,
    http: Arc<dyn HttpTransport>,
}

impl WhatsAppClient {
    /// Validate `config` and build a client.
    ///
    /// Errors:
    /// - [`WhatsAppError::InvalidConfig`] when a required field is empty or the base URL is
    ///   not an absolute http(s) URL,
    /// - [`WhatsAppError::BuildRequest`] when the default HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, WhatsAppError> {
        let ClientConfig {
            api_version,
            phone_number_id,
            token,
            base_url,
            timeout,
            http_client,
        } = config;

        let api_version = ApiVersion::new(api_version)?;
        let phone_number_id = PhoneNumberId::new(phone_number_id)?;
        let token = AccessToken::new(token)?;
        let base_url = match base_url {
            Some(base_url) => BaseUrl::new(base_url)?,
            None => BaseUrl::default(),
        };

        let client = match http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(effective_timeout(timeout))
                .build()
                .map_err(|err| WhatsAppError::BuildRequest(Box::new(err)))?,
        };

        Ok(Self {
            api_version,
            phone_number_id,
            token,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }

    /// Graph API version the client posts to.
    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Sending phone number id.
    pub fn phone_number_id(&self) -> &PhoneNumberId {
        &self.phone_number_id
    }

    /// Graph API root in use.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Full URL messages are posted to.
    pub fn messages_endpoint(&self) -> String {
        self.base_url
            .messages_endpoint(&self.api_version, &self.phone_number_id)
    }

    /// Send one text message to `to`.
    ///
    /// The request is aborted as soon as `cancel` fires; use a timer that cancels the
    /// token to impose a deadline.
    ///
    /// Errors:
    /// - [`WhatsAppError::Marshal`] if the request cannot be encoded or a success body does
    ///   not match the expected shape,
    /// - [`WhatsAppError::BuildRequest`] / [`WhatsAppError::SendRequest`] for transport
    ///   failures, including timeouts and cancellation,
    /// - [`WhatsAppError::ApiResponse`] for HTTP status >= 400.
    pub async fn send_text_message(
        &self,
        to: impl Into<String>,
        body: impl Into<String>,
        cancel: &CancellationToken,
    ) -> Result<SendResult, WhatsAppError> {
        let message = TextMessage::new(to, body);
        let payload =
            crate::transport::encode_text_message_json(&message).map_err(WhatsAppError::Marshal)?;
        let url = self.messages_endpoint();

        debug!(url = %url, to = message.to(), "sending WhatsApp text message");

        let outcome = tokio::select! {
            biased;

            _ = cancel.cancelled() => Err(HttpFailure::Send(Box::new(Cancelled))),
            result = self.http.post_json(&url, &self.token, payload) => result,
        };
        let response = outcome?;

        debug!(status = response.status, "received WhatsApp API response");

        if response.status >= 400 {
            return Err(api_response_error(response.status, &response.body));
        }

        crate::transport::decode_send_message_json_response(&response.body)
            .map_err(WhatsAppError::Marshal)
    }
}

fn api_response_error(status: u16, body: &[u8]) -> WhatsAppError {
    match crate::transport::decode_error_envelope_json(body) {
        Ok(Some(error)) => {
            let detail = error.describe();
            warn!(
                status,
                code = error.code.as_i64(),
                kind = %error.kind,
                fbtrace_id = error.fbtrace_id.as_deref(),
                "WhatsApp API rejected the request: {detail}"
            );
            WhatsAppError::ApiResponse {
                status,
                detail: (!detail.is_empty()).then_some(detail),
                error: Some(error),
                source: None,
            }
        }
        Ok(None) => {
            warn!(status, "WhatsApp API error response has no error object");
            WhatsAppError::ApiResponse {
                status,
                detail: None,
                error: None,
                source: None,
            }
        }
        Err(err) => {
            warn!(status, "WhatsApp API error response is not a valid envelope: {err}");
            WhatsAppError::ApiResponse {
                status,
                detail: Some(err.to_string()),
                error: None,
                source: Some(err),
            }
        }
    }
}
