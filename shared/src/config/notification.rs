//! Notification channel configuration (email and SMS)

use serde::{Deserialize, Serialize};

/// SMTP email configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// Provider ("smtp" or "mock")
    pub provider: String,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port (465 for implicit TLS)
    pub smtp_port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password or app password
    pub password: String,

    /// Display name used in the From header
    pub from_name: String,

    /// Sender address; defaults to the username when empty
    pub from_address: String,

    /// Connection timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 465,
            username: String::new(),
            password: String::new(),
            from_name: String::from("University Admin"),
            from_address: String::new(),
            timeout_secs: 10,
        }
    }
}

impl MailConfig {
    /// Sender mailbox in `Name <address>` form
    pub fn from_mailbox(&self) -> String {
        let address = if self.from_address.is_empty() {
            &self.username
        } else {
            &self.from_address
        };
        format!("{} <{}>", self.from_name, address)
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// SMS service provider ("twilio" or "mock")
    pub provider: String,

    /// Twilio account SID
    pub account_sid: String,

    /// Twilio auth token
    pub auth_token: String,

    /// From phone number (E.164)
    pub from_number: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::from("+10000000000"),
        }
    }
}
