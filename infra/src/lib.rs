//! # Infrastructure Layer
//!
//! Concrete implementations of the guardian portal's outer dependencies:
//!
//! - **Database**: MySQL repositories for tokens, students and subjects using SQLx
//! - **Mail**: SMTP email delivery through lettre, plus a console mock
//! - **SMS**: Twilio SMS delivery, plus a console mock
//! - **Wiring**: builds the repository and sender set selected by configuration
//!
//! ## Features
//!
//! - `twilio-sms`: Enable Twilio SMS service (default)

// Re-export core types for convenience
pub use gp_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email delivery module
pub mod mail;

/// SMS service module - External SMS providers
pub mod sms;

/// Backend selection and service construction
pub mod wiring;

pub use wiring::{initialize, InfrastructureServices};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
