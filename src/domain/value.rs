use std::fmt;

use url::Url;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Graph API version segment, e.g. `v21.0`.
///
/// Invariant: must not be empty (the value is used verbatim).
pub struct ApiVersion(String);

impl ApiVersion {
    /// Human-readable field name used in validation errors.
    pub const FIELD: &'static str = "api version";

    /// Create a validated [`ApiVersion`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated version.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identifier of the sending WhatsApp Business phone number.
///
/// Invariant: must not be empty (the value is used verbatim).
pub struct PhoneNumberId(String);

impl PhoneNumberId {
    /// Human-readable field name used in validation errors.
    pub const FIELD: &'static str = "phone number id";

    /// Create a validated [`PhoneNumberId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated phone number id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token sent in the `Authorization` header.
///
/// Invariant: must not be empty (whitespace is preserved). `Debug` output is redacted.
pub struct AccessToken(String);

impl AccessToken {
    /// Human-readable field name used in validation errors.
    pub const FIELD: &'static str = "token";

    /// Create a validated [`AccessToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Root of the Graph API, without a trailing slash.
///
/// Invariant: an absolute `http` or `https` URL without query or fragment.
pub struct BaseUrl(String);

impl BaseUrl {
    /// Human-readable field name used in validation errors.
    pub const FIELD: &'static str = "base url";

    /// Host used when no base URL is configured.
    pub const DEFAULT: &'static str = "https://graph.facebook.com";

    /// Create a validated [`BaseUrl`].
    ///
    /// An empty (or whitespace-only) value falls back to [`BaseUrl::DEFAULT`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let parsed = Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: value.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https")
            || !parsed.has_host()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
        {
            return Err(ValidationError::InvalidUrl {
                field: Self::FIELD,
                input: value,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the base URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Messages endpoint for the given sender: `{base}/{version}/{phone_number_id}/messages`.
    pub fn messages_endpoint(&self, version: &ApiVersion, sender: &PhoneNumberId) -> String {
        format!("{}/{}/{}/messages", self.0, version.as_str(), sender.as_str())
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Graph API error code (`error.code`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ApiErrorCode(i64);

impl ApiErrorCode {
    /// Construct an error code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as returned by the API.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known_kind(self) -> Option<KnownApiErrorCode> {
        KnownApiErrorCode::from_code(self.0)
    }

    /// Returns `true` if the code represents an invalid/expired token or missing permission.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_auth_error())
    }

    /// Returns `true` if the code reports a throttling limit.
    pub fn is_throttled(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_throttled())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Known Graph API / WhatsApp Cloud API error codes.
pub enum KnownApiErrorCode {
    AuthException,
    ApiTooManyCalls,
    PermissionDenied,
    InvalidParameter,
    AccessTokenExpired,
    TemporarilyBlocked,
    AccountRateLimited,
    RateLimitHit,
    GenericError,
    AccessDenied,
    RequiredParameterMissing,
    ParameterValueInvalid,
    ServiceUnavailable,
    RecipientCannotBeSender,
    MessageUndeliverable,
    RecipientNotAllowed,
    AccountLocked,
    ReEngagementRequired,
    UnsupportedMessageType,
    PairRateLimitHit,
    PhoneNumberNotRegistered,
}

impl KnownApiErrorCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::AuthException,
            4 => Self::ApiTooManyCalls,
            10 => Self::PermissionDenied,
            100 => Self::InvalidParameter,
            190 => Self::AccessTokenExpired,
            368 => Self::TemporarilyBlocked,
            80007 => Self::AccountRateLimited,
            130429 => Self::RateLimitHit,
            131000 => Self::GenericError,
            131005 => Self::AccessDenied,
            131008 => Self::RequiredParameterMissing,
            131009 => Self::ParameterValueInvalid,
            131016 => Self::ServiceUnavailable,
            131021 => Self::RecipientCannotBeSender,
            131026 => Self::MessageUndeliverable,
            131030 => Self::RecipientNotAllowed,
            131031 => Self::AccountLocked,
            131047 => Self::ReEngagementRequired,
            131051 => Self::UnsupportedMessageType,
            131056 => Self::PairRateLimitHit,
            133010 => Self::PhoneNumberNotRegistered,
            _ => return None,
        })
    }

    /// Whether the code indicates bad credentials or missing permissions.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::AuthException
                | Self::PermissionDenied
                | Self::AccessTokenExpired
                | Self::AccessDenied
        )
    }

    /// Whether the code reports that a throttling limit was reached.
    pub fn is_throttled(self) -> bool {
        matches!(
            self,
            Self::ApiTooManyCalls
                | Self::AccountRateLimited
                | Self::RateLimitHit
                | Self::PairRateLimitHit
        )
    }
}
