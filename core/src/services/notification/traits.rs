//! Traits for email and SMS provider integration

use async_trait::async_trait;

/// Email ready to hand to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Trait for email provider integration
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send an email, returning the provider's message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String>;

    /// Provider name for logs (e.g., "SMTP", "Mock")
    fn provider_name(&self) -> &str;
}

/// Trait for SMS provider integration
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a text message to an E.164 number, returning the provider's message id
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, String>;

    fn provider_name(&self) -> &str;
}
