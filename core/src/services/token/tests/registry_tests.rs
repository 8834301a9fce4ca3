//! Unit tests for token listing and revocation

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::access_token::{ExpiryOption, TokenStatus};
use crate::domain::value_objects::issuance::{IssueRequest, TokenFilter};
use crate::errors::{DomainError, ErrorKind, TokenError};
use crate::repositories::TokenRepository;

use super::fixtures::{admin, harness};

#[tokio::test]
async fn test_list_sweeps_expired_tokens() {
    let h = harness();
    let ids: Vec<String> = h.students.iter().map(|s| s.id.to_string()).collect();
    h.issuer
        .issue(&admin(), IssueRequest::new(ids[..2].to_vec()))
        .await
        .unwrap();
    h.clock.advance(Duration::hours(1));
    h.issuer
        .issue(
            &admin(),
            IssueRequest::new(ids[2..].to_vec()).with_expiry(ExpiryOption::Days7),
        )
        .await
        .unwrap();

    h.clock.advance(Duration::hours(24));
    let views = h.registry.list_tokens(&admin(), &TokenFilter::default()).await.unwrap();

    assert_eq!(views.len(), 3);
    // Newest first
    assert_eq!(views[0].student.as_ref().unwrap().full_name, "Meera Nair");
    assert_eq!(views[0].status, TokenStatus::Active);
    assert_eq!(views[1].status, TokenStatus::Expired);
    assert_eq!(views[2].status, TokenStatus::Expired);

    // The sweep was persisted, not only reflected in the listing
    let stored = h.tokens.find_by_id(views[1].id).await.unwrap().unwrap();
    assert_eq!(stored.status, TokenStatus::Expired);
}

#[tokio::test]
async fn test_list_filters_by_status_and_search() {
    let h = harness();
    let ids: Vec<String> = h.students.iter().map(|s| s.id.to_string()).collect();
    let report = h.issuer.issue(&admin(), IssueRequest::new(ids)).await.unwrap();
    let first = report.tokens().next().cloned().unwrap();
    h.validator.validate(&first.value).await.unwrap();

    let used = h
        .registry
        .list_tokens(
            &admin(),
            &TokenFilter {
                status: Some(TokenStatus::Used),
                search: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(used.len(), 1);
    assert_eq!(used[0].id, first.id);

    let by_name = h
        .registry
        .list_tokens(
            &admin(),
            &TokenFilter {
                status: None,
                search: Some("ravi".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].student.as_ref().unwrap().urn, 2102);
}

#[tokio::test]
async fn test_revoke_active_token() {
    let h = harness();
    let report = h
        .issuer
        .issue(&admin(), IssueRequest::new(vec![h.students[0].id.to_string()]))
        .await
        .unwrap();
    let token = report.tokens().next().cloned().unwrap();

    let revoked = h.registry.revoke(&admin(), token.id).await.unwrap();
    assert_eq!(revoked.status, TokenStatus::Expired);
    assert!(revoked.used_at.is_none());
    assert_eq!(revoked.student.unwrap().id, h.students[0].id);
}

#[tokio::test]
async fn test_revoke_non_active_fails_and_leaves_state() {
    let h = harness();
    let report = h
        .issuer
        .issue(&admin(), IssueRequest::new(vec![h.students[0].id.to_string()]))
        .await
        .unwrap();
    let token = report.tokens().next().cloned().unwrap();
    let guardian = h.validator.validate(&token.value).await.unwrap();

    let err = h.registry.revoke(&admin(), token.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(matches!(
        err,
        DomainError::Token(TokenError::NotActive {
            status: TokenStatus::Used
        })
    ));

    let stored = h.tokens.find_by_id(token.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TokenStatus::Used);
    assert_eq!(stored.used_at, Some(guardian.accessed_at));

    // Revoking twice is not idempotent
    let second = h
        .issuer
        .issue(&admin(), IssueRequest::new(vec![h.students[1].id.to_string()]))
        .await
        .unwrap();
    let other = second.tokens().next().cloned().unwrap();
    h.registry.revoke(&admin(), other.id).await.unwrap();
    let again = h.registry.revoke(&admin(), other.id).await.unwrap_err();
    assert_eq!(again.kind(), ErrorKind::InvalidState);
}

#[tokio::test]
async fn test_revoke_time_expired_token_is_invalid_state() {
    let h = harness();
    let report = h
        .issuer
        .issue(&admin(), IssueRequest::new(vec![h.students[0].id.to_string()]))
        .await
        .unwrap();
    let token = report.tokens().next().cloned().unwrap();

    h.clock.advance(Duration::days(2));
    let err = h.registry.revoke(&admin(), token.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[tokio::test]
async fn test_revoke_unknown_token_is_not_found() {
    let h = harness();
    let err = h.registry.revoke(&admin(), Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
