//! Unit tests for error classification

use crate::domain::entities::access_token::TokenStatus;
use crate::errors::{DeliveryError, DomainError, ErrorKind, TokenError, ValidationError};

#[test]
fn test_token_errors_map_to_distinct_kinds() {
    assert_eq!(DomainError::from(TokenError::Unknown).kind(), ErrorKind::NotFound);
    assert_eq!(DomainError::from(TokenError::NotFound).kind(), ErrorKind::NotFound);
    assert_eq!(DomainError::from(TokenError::Gone).kind(), ErrorKind::Gone);
    assert_eq!(
        DomainError::from(TokenError::NotActive { status: TokenStatus::Used }).kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(
        DomainError::from(TokenError::GenerationFailed).kind(),
        ErrorKind::Internal
    );
}

#[test]
fn test_validation_errors_are_validation_kind() {
    let err: DomainError = ValidationError::RequiredField {
        field: "studentIds".to_string(),
    }
    .into();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.code(), "REQUIRED_FIELD");
    assert_eq!(err.to_string(), "Field required: studentIds");

    let plain = DomainError::Validation {
        message: "bad".to_string(),
    };
    assert_eq!(plain.kind(), ErrorKind::Validation);
    assert_eq!(plain.code(), "VALIDATION_ERROR");
}

#[test]
fn test_token_messages() {
    assert_eq!(TokenError::Unknown.to_string(), "Invalid or unknown token");
    assert_eq!(
        TokenError::Gone.to_string(),
        "This token has expired or was revoked"
    );
    let not_active = TokenError::NotActive {
        status: TokenStatus::Expired,
    };
    assert!(not_active.to_string().starts_with("Only active tokens can be revoked"));
    assert!(not_active.to_string().contains("Expired"));
}

#[test]
fn test_delivery_error_kind_and_code() {
    let err: DomainError = DeliveryError::Email {
        message: "connection refused".to_string(),
    }
    .into();
    assert_eq!(err.kind(), ErrorKind::Delivery);
    assert_eq!(err.code(), "DELIVERY_FAILED");

    let missing = DeliveryError::MissingContact {
        channel: "email".to_string(),
    };
    assert_eq!(missing.code(), "MISSING_CONTACT");
    assert_eq!(
        missing.to_string(),
        "No guardian email found in request or student record"
    );
}
