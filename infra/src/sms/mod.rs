//! SMS Service Module
//!
//! Implementations of the core `SmsSender` trait:
//!
//! - **Mock Implementation**: console/log output for development
//! - **Twilio Support**: production SMS via the Twilio API (feature `twilio-sms`)

use std::sync::Arc;

use gp_core::services::SmsSender;
use gp_shared::SmsConfig;

pub mod mock_sms;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use mock_sms::MockSmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Unknown providers and Twilio set-up failures fall back to the mock service.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsSender> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => match TwilioConfig::from_sms_config(config) {
            Ok(twilio_config) => Arc::new(TwilioSmsService::new(twilio_config)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Twilio SMS service");
                tracing::warn!("Falling back to mock SMS service");
                Arc::new(MockSmsService::new())
            }
        },
        other => {
            tracing::warn!(provider = other, "Unknown SMS provider, using mock implementation");
            Arc::new(MockSmsService::new())
        }
    }
}
