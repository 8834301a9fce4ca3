//! Unit tests for Twilio SMS service

use gp_core::services::SmsSender;
use gp_shared::SmsConfig;

use crate::sms::{TwilioConfig, TwilioSmsService};

fn sms_config() -> SmsConfig {
    SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "ACtest_account_sid".to_string(),
        auth_token: "test_auth_token".to_string(),
        from_number: "+15551234567".to_string(),
    }
}

#[test]
fn test_twilio_config_from_sms_config() {
    let config = TwilioConfig::from_sms_config(&sms_config()).unwrap();
    assert_eq!(config.account_sid, "ACtest_account_sid");
    assert_eq!(config.from_number, "+15551234567");
    assert_eq!(config.max_retries, 3);
}

#[test]
fn test_twilio_config_requires_e164_sender() {
    let err = TwilioConfig::from_sms_config(&SmsConfig {
        from_number: "15551234567".to_string(),
        ..sms_config()
    })
    .unwrap_err();
    assert!(err.to_string().contains("E.164 format"));
}

#[test]
fn test_phone_validation() {
    assert_eq!(
        TwilioSmsService::validate_phone_number("+14155552671").unwrap(),
        "+14155552671"
    );
    assert!(TwilioSmsService::validate_phone_number("4155552671").is_err());
    assert!(TwilioSmsService::validate_phone_number("+abc").is_err());
}

#[tokio::test]
async fn test_rejects_overlong_message_before_sending() {
    let service = TwilioSmsService::new(TwilioConfig::from_sms_config(&sms_config()).unwrap());
    let body = "x".repeat(1601);

    let err = service.send_sms("+14155552671", &body).await.unwrap_err();
    assert!(err.contains("maximum length"));
}
