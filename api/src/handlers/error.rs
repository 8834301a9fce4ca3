use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use gp_core::errors::{DomainError, ErrorKind, ValidationError};
use gp_shared::{error_codes, ErrorResponse};

use crate::dto::error::ErrorResponseExt;

/// HTTP status for a domain error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InvalidState => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Gone => StatusCode::GONE,
        ErrorKind::Delivery => StatusCode::BAD_GATEWAY,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error.kind());
    if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
        // Internal details stay in the log
        return ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
            .to_response(status);
    }

    log::debug!("Request rejected: {} ({})", error, error.code());
    ErrorResponse::new(error.code(), error.to_string()).to_response(status)
}

/// Domain error returned from a handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.0.kind())
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        ApiError(DomainError::Validation {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::errors::TokenError;
    use gp_core::TokenStatus;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (TokenError::Gone.into(), StatusCode::GONE),
            (TokenError::Unknown.into(), StatusCode::NOT_FOUND),
            (
                TokenError::NotActive {
                    status: TokenStatus::Used,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ValidationError::RequiredField {
                    field: "token".to_string(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::internal("db down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError(error).status_code(), expected);
        }
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let response = handle_domain_error(&DomainError::internal("connection refused"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
