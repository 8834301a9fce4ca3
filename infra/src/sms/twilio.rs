//! Twilio SMS Service Implementation
//!
//! Production SMS delivery through the Twilio API with E.164 validation and
//! bounded retries with exponential backoff. Phone numbers are masked in logs.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use gp_core::services::SmsSender;
use gp_shared::utils::mask_phone_number;
use gp_shared::SmsConfig;

use crate::InfrastructureError;

/// Twilio's hard limit on a message body
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Derive the Twilio settings from the SMS section of the application config
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "sms.account_sid and sms.auth_token are required for Twilio".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "sms.from_number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Self { client, config }
    }

    /// Validate and normalize a phone number to E.164 format
    pub(crate) fn validate_phone_number(phone: &str) -> Result<String, InfrastructureError> {
        if !phone.starts_with('+') {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +14155552671)".to_string(),
            ));
        }

        let parsed = phone.parse::<PhoneNumber>().map_err(|e| {
            error!(error = %e, "Invalid phone number format");
            InfrastructureError::Sms(format!("Invalid phone number format: {}", e))
        })?;
        let formatted = parsed.format().mode(Mode::E164).to_string();
        debug!(phone = %mask_phone_number(&formatted), "Validated phone number");
        Ok(formatted)
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                attempt = attempts,
                max = self.config.max_retries,
                to = %mask_phone_number(to),
                "Sending SMS"
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, body);
            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        to = %mask_phone_number(to),
                        sid = %response.sid,
                        "SMS sent successfully"
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    error!(
                        attempt = attempts,
                        max = self.config.max_retries,
                        error = %e,
                        "Failed to send SMS"
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }

                    let error_msg = e.to_string();
                    if error_msg.contains("400") || error_msg.contains("invalid") {
                        // Client errors will not succeed on retry
                        return Err(InfrastructureError::Sms(format!("Invalid request: {}", e)));
                    }
                    warn!(?delay, "Retrying SMS after backoff");

                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSmsService {
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, String> {
        let normalized = Self::validate_phone_number(phone).map_err(|e| e.to_string())?;

        if body.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            ));
        }

        info!(
            to = %mask_phone_number(&normalized),
            length = body.len(),
            "Sending SMS via Twilio"
        );
        self.send_with_retry(&normalized, body)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
