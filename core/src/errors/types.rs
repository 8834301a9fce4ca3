//! Specific error types for guardian tokens, input validation and notification delivery

use thiserror::Error;

use crate::domain::entities::access_token::TokenStatus;

/// Guardian access token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No token with the presented value exists (also used for malformed values)
    #[error("Invalid or unknown token")]
    Unknown,

    /// No token with the given id exists
    #[error("Token not found")]
    NotFound,

    /// The token expired, was revoked or was already consumed
    #[error("This token has expired or was revoked")]
    Gone,

    /// Revocation requested on a token that is no longer active
    #[error("Only active tokens can be revoked (current status: {status})")]
    NotActive { status: TokenStatus },

    /// A generated token value collided with an existing one
    #[error("Token value already exists")]
    DuplicateValue,

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Stable error code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Unknown => "TOKEN_INVALID",
            TokenError::NotFound => "TOKEN_NOT_FOUND",
            TokenError::Gone => "TOKEN_GONE",
            TokenError::NotActive { .. } => "INVALID_STATE",
            TokenError::DuplicateValue => "TOKEN_DUPLICATE",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Value out of range for field: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Unsupported expiry '{value}'; expected one of: 24 hours, 48 hours, 72 hours, 7 days")]
    UnsupportedExpiry { value: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Duplicate value for field: {field}")]
    DuplicateValue { field: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::UnsupportedExpiry { .. } => "UNSUPPORTED_EXPIRY",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidPhone => "INVALID_PHONE",
            ValidationError::DuplicateValue { .. } => "DUPLICATE_VALUE",
            ValidationError::BusinessRuleViolation { .. } => "BUSINESS_RULE_VIOLATION",
        }
    }
}

/// Notification delivery errors
///
/// These never roll back a created token; they are reported per item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("No guardian {channel} found in request or student record")]
    MissingContact { channel: String },

    #[error("Email delivery failed: {message}")]
    Email { message: String },

    #[error("SMS delivery failed: {message}")]
    Sms { message: String },
}

impl DeliveryError {
    pub fn code(&self) -> &'static str {
        match self {
            DeliveryError::MissingContact { .. } => "MISSING_CONTACT",
            DeliveryError::Email { .. } | DeliveryError::Sms { .. } => "DELIVERY_FAILED",
        }
    }
}
