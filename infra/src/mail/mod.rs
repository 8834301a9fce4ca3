//! Email Delivery Module
//!
//! Implementations of the core `EmailSender` trait:
//!
//! - **SMTP**: lettre transport over implicit TLS
//! - **Mock**: console output for development
//!
//! Recipient addresses are masked in every log line.

use std::sync::Arc;

use gp_core::services::EmailSender;
use gp_shared::MailConfig;

pub mod mock_mail;
pub mod smtp;

pub use mock_mail::MockEmailSender;
pub use smtp::SmtpEmailSender;

#[cfg(test)]
mod tests;

/// Create an email sender based on configuration
///
/// Falls back to the mock sender when the provider is unknown or the SMTP
/// transport cannot be built.
pub fn create_email_sender(config: &MailConfig) -> Arc<dyn EmailSender> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockEmailSender::new()),
        "smtp" => match SmtpEmailSender::new(config) {
            Ok(sender) => Arc::new(sender),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize SMTP email sender");
                tracing::warn!("Falling back to mock email sender");
                Arc::new(MockEmailSender::new())
            }
        },
        other => {
            tracing::warn!(provider = other, "Unknown mail provider, using mock implementation");
            Arc::new(MockEmailSender::new())
        }
    }
}
