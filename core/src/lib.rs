//! # Guardian Portal Core
//!
//! Domain layer of the guardian portal backend: single-use guardian access
//! tokens (issuance, validation, revocation), the student record store they
//! unlock, and guardian notification dispatch. Persistence and providers are
//! reached through traits implemented in the infra crate.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AccessToken, AdminContext, DeliveryChannel, ExpiryOption, IssuanceReport, IssueRequest,
    Student, Subject, TokenStatus, TokenView,
};
pub use errors::{DeliveryError, DomainError, ErrorKind, TokenError, ValidationError};
pub use repositories::{StudentRepository, SubjectRepository, TokenRepository};
pub use services::{
    Clock, NotificationDispatcher, StudentService, TokenIssuer, TokenRegistry, TokenValidator,
};
