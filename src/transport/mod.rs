//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_message;

pub use send_message::{
    decode_error_envelope_json, decode_send_message_json_response, encode_text_message_json,
};
