//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MESSAGING_PRODUCT, TEXT_MESSAGE_TYPE, TextMessage};
pub use response::{ApiErrorDetails, Contact, SendResult, SentMessage};
pub use validation::ValidationError;
pub use value::{
    AccessToken, ApiErrorCode, ApiVersion, BaseUrl, KnownApiErrorCode, PhoneNumberId,
};
