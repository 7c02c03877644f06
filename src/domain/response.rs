use crate::domain::value::ApiErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful response of the messages endpoint.
///
/// `contacts` and `messages` keep the order returned by the API.
pub struct SendResult {
    pub messaging_product: Option<String>,
    pub contacts: Vec<Contact>,
    pub messages: Vec<SentMessage>,
}

impl SendResult {
    /// Id of the first accepted message, if the API returned one.
    pub fn first_message_id(&self) -> Option<&str> {
        self.messages.first().map(|message| message.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Recipient resolution reported by the API.
pub struct Contact {
    /// Recipient as it was sent.
    pub input: String,
    /// WhatsApp id the recipient resolved to.
    pub wa_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A message accepted by the API.
pub struct SentMessage {
    /// WhatsApp message id (`wamid.*`).
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Contents of the `error` object in a non-success response.
pub struct ApiErrorDetails {
    pub message: String,
    pub kind: String,
    pub code: ApiErrorCode,
    pub details: Option<String>,
    pub fbtrace_id: Option<String>,
}

impl ApiErrorDetails {
    /// `message`, followed by `(details)` when details are present.
    pub fn describe(&self) -> String {
        match self.details.as_deref() {
            Some(details) if !details.is_empty() => format!("{} ({details})", self.message),
            _ => self.message.clone(),
        }
    }
}
