//! Unit tests for batch token issuance

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::access_token::{DeliveryChannel, ExpiryOption, TokenStatus};
use crate::domain::value_objects::issuance::{
    ChannelStatus, IssuanceItem, IssueRequest, RecipientOverride,
};
use crate::errors::{DomainError, ErrorKind};
use crate::repositories::TokenRepository;
use crate::services::notification::tests::mocks::RecordingEmailSender;
use crate::services::token::TokenServiceConfig;

use super::fixtures::{admin, harness, harness_with, start};

#[tokio::test]
async fn test_issue_creates_active_tokens_with_summary() {
    let h = harness();
    let ids = vec![h.students[0].id.to_string(), h.students[1].id.to_string()];

    let report = h
        .issuer
        .issue(
            &admin(),
            IssueRequest::new(ids)
                .with_semester(4)
                .with_expiry(ExpiryOption::Hours72),
        )
        .await
        .unwrap();

    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.successful, 2);
    assert_eq!(report.created, 2);

    let views: Vec<_> = report.tokens().collect();
    assert_eq!(views[0].student.as_ref().unwrap().full_name, "Asha Verma");
    assert_eq!(views[1].student.as_ref().unwrap().urn, 2102);
    for view in &views {
        assert_eq!(view.status, TokenStatus::Active);
        assert_eq!(view.semester, 4);
        assert_eq!(view.delivery_channel, DeliveryChannel::Email);
        assert_eq!(view.expires_at, start() + Duration::hours(72));
        assert_eq!(view.value.len(), 32);
        assert!(view.value.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(view.used_at.is_none());
    }
    assert_ne!(views[0].value, views[1].value);
    assert_eq!(h.tokens.len().await, 2);
    // Delivery was not requested
    assert!(h.email.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_and_unknown_ids_are_reported_per_item() {
    let h = harness();
    let ids = vec![
        h.students[0].id.to_string(),
        "not-a-uuid".to_string(),
        h.students[2].id.to_string(),
        Uuid::new_v4().to_string(),
    ];

    let report = h.issuer.issue(&admin(), IssueRequest::new(ids)).await.unwrap();

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.created, 2);
    assert_eq!(report.summary.failed, 2);
    match &report.items[1] {
        IssuanceItem::Failed { student_id, error } => {
            assert_eq!(student_id, "not-a-uuid");
            assert_eq!(error.code, "INVALID_FORMAT");
        }
        other => panic!("expected failure, got {:?}", other),
    }
    match &report.items[3] {
        IssuanceItem::Failed { error, .. } => assert_eq!(error.code, "STUDENT_NOT_FOUND"),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(h.tokens.len().await, 2);
}

#[tokio::test]
async fn test_three_students_one_invalid_yields_two_tokens() {
    let h = harness();
    let ids = vec![
        h.students[0].id.to_string(),
        h.students[1].id.to_string(),
        "64f1c2e9a7b3".to_string(),
    ];

    let report = h.issuer.issue(&admin(), IssueRequest::new(ids)).await.unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.summary.successful, 2);
    assert_eq!(report.summary.failed, 1);
}

#[tokio::test]
async fn test_empty_batch_and_zero_semester_are_rejected() {
    let h = harness();

    let err = h.issuer.issue(&admin(), IssueRequest::new(vec![])).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = h
        .issuer
        .issue(
            &admin(),
            IssueRequest::new(vec![h.students[0].id.to_string()]).with_semester(0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(_)));
    assert!(h.tokens.is_empty().await);
}

#[tokio::test]
async fn test_delivery_sends_guardian_url() {
    let h = harness();
    let asha = &h.students[0];
    let request = IssueRequest::new(vec![asha.id.to_string()])
        .with_channel(DeliveryChannel::Both)
        .delivering(vec![RecipientOverride {
            student_id: asha.id.to_string(),
            email: Some("parent@example.com".to_string()),
            phone: None,
        }]);

    let report = h.issuer.issue(&admin(), request).await.unwrap();

    let IssuanceItem::Created { token, guardian_url, delivery } = &report.items[0] else {
        panic!("expected created item");
    };
    assert_eq!(
        guardian_url,
        &format!("http://localhost:5173/guardian?token={}", token.value)
    );
    assert_eq!(delivery.email, ChannelStatus::Sent);
    assert_eq!(delivery.sms, ChannelStatus::Sent);

    let mail = h.email.sent();
    assert_eq!(mail[0].to, "parent@example.com");
    assert_eq!(mail[0].subject, "Academic Update for Asha Verma");
    assert!(mail[0].text_body.contains(guardian_url.as_str()));
    assert!(h.sms.sent()[0].1.contains(guardian_url.as_str()));
}

#[tokio::test]
async fn test_delivery_failure_keeps_token_active() {
    let h = harness_with(RecordingEmailSender::failing(), TokenServiceConfig::default());
    let request = IssueRequest::new(vec![h.students[0].id.to_string()]).delivering(vec![]);

    let report = h.issuer.issue(&admin(), request).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.summary.failed, 1);
    let IssuanceItem::Created { token, delivery, .. } = &report.items[0] else {
        panic!("expected created item");
    };
    assert_eq!(delivery.email, ChannelStatus::Failed);
    assert_eq!(delivery.errors[0].code, "DELIVERY_FAILED");

    let stored = h.tokens.find_by_id(token.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TokenStatus::Active);
}

#[test]
fn test_expiry_resolution_modes() {
    let lenient = TokenServiceConfig::default();
    assert_eq!(lenient.resolve_expiry(None).unwrap(), ExpiryOption::Hours24);
    assert_eq!(lenient.resolve_expiry(Some("7 days")).unwrap(), ExpiryOption::Days7);
    assert_eq!(lenient.resolve_expiry(Some("3 weeks")).unwrap(), ExpiryOption::Hours24);

    let strict = TokenServiceConfig {
        strict_expiry: true,
        ..TokenServiceConfig::default()
    };
    assert!(strict.resolve_expiry(Some("3 weeks")).is_err());
    assert_eq!(strict.resolve_expiry(Some("")).unwrap(), ExpiryOption::Hours24);
}
