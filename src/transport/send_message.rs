use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiErrorCode, ApiErrorDetails, Contact, MESSAGING_PRODUCT, SendResult, SentMessage,
    TEXT_MESSAGE_TYPE, TextMessage,
};

#[derive(Debug, Serialize)]
struct TextMessageJsonRequest<'a> {
    messaging_product: &'a str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    text: TextJsonComponent<'a>,
}

#[derive(Debug, Serialize)]
struct TextJsonComponent<'a> {
    preview_url: bool,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageJsonResponse {
    #[serde(default)]
    messaging_product: Option<String>,
    #[serde(default)]
    contacts: Vec<ContactJson>,
    #[serde(default)]
    messages: Vec<MessageJson>,
}

#[derive(Debug, Deserialize)]
struct ContactJson {
    input: String,
    wa_id: String,
}

#[derive(Debug, Deserialize)]
struct MessageJson {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelopeJson {
    #[serde(default)]
    error: Option<ApiErrorJson>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorJson {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    code: i64,
    #[serde(default)]
    error_data: Option<ErrorDataJson>,
    #[serde(default)]
    fbtrace_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDataJson {
    #[serde(default)]
    details: Option<String>,
}

pub fn encode_text_message_json(message: &TextMessage) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&TextMessageJsonRequest {
        messaging_product: MESSAGING_PRODUCT,
        to: message.to(),
        kind: TEXT_MESSAGE_TYPE,
        text: TextJsonComponent {
            preview_url: message.preview_url(),
            body: message.body(),
        },
    })
}

pub fn decode_send_message_json_response(body: &[u8]) -> Result<SendResult, serde_json::Error> {
    let parsed: SendMessageJsonResponse = serde_json::from_slice(body)?;

    Ok(SendResult {
        messaging_product: parsed.messaging_product,
        contacts: parsed
            .contacts
            .into_iter()
            .map(|contact| Contact {
                input: contact.input,
                wa_id: contact.wa_id,
            })
            .collect(),
        messages: parsed
            .messages
            .into_iter()
            .map(|message| SentMessage { id: message.id })
            .collect(),
    })
}

/// Decode the error envelope of a non-success response.
///
/// Returns `Ok(None)` when the body is valid JSON without an `error` object.
pub fn decode_error_envelope_json(
    body: &[u8],
) -> Result<Option<ApiErrorDetails>, serde_json::Error> {
    let parsed: ErrorEnvelopeJson = serde_json::from_slice(body)?;

    Ok(parsed.error.map(|error| ApiErrorDetails {
        message: error.message,
        kind: error.kind,
        code: ApiErrorCode::new(error.code),
        details: error.error_data.and_then(|data| data.details),
        fbtrace_id: error.fbtrace_id,
    }))
}
