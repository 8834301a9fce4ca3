//! Unit tests for SMS service creation

use gp_shared::SmsConfig;

use crate::sms::create_sms_service;

#[test]
fn test_create_mock_service() {
    let service = create_sms_service(&SmsConfig::default());
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_unknown_provider_fallback() {
    let config = SmsConfig {
        provider: "unknown".to_string(),
        ..SmsConfig::default()
    };
    assert_eq!(create_sms_service(&config).provider_name(), "Mock");
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_create_twilio_service() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "ACtest_account_sid".to_string(),
        auth_token: "test_auth_token".to_string(),
        from_number: "+15551234567".to_string(),
    };
    assert_eq!(create_sms_service(&config).provider_name(), "Twilio");

    // Missing credentials fall back to the mock
    let incomplete = SmsConfig {
        account_sid: String::new(),
        ..config
    };
    assert_eq!(create_sms_service(&incomplete).provider_name(), "Mock");
}
