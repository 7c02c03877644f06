/// Value of the `messaging_product` field on every request.
pub const MESSAGING_PRODUCT: &str = "whatsapp";

/// Value of the `type` field for plain text messages.
pub const TEXT_MESSAGE_TYPE: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single plain-text message to one recipient.
///
/// Link previews are always disabled.
pub struct TextMessage {
    to: String,
    body: String,
}

impl TextMessage {
    /// Create a text message; `to` and `body` are sent as given.
    pub fn new(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: body.into(),
        }
    }

    /// Recipient phone number or WhatsApp id, passed through unchanged.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Value of `text.preview_url`; always `false`.
    pub fn preview_url(&self) -> bool {
        false
    }
}
