//! Tests for the in-memory token repository

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::access_token::{
    AccessToken, DeliveryChannel, ExpiryOption, TokenStatus,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::{InMemoryTokenRepository, TokenRepository};

fn token(value: &str) -> AccessToken {
    AccessToken::new(
        Uuid::new_v4(),
        value.to_string(),
        DeliveryChannel::Email,
        1,
        ExpiryOption::Hours24,
        Utc::now(),
    )
}

#[tokio::test]
async fn test_save_rejects_duplicate_value() {
    let repo = InMemoryTokenRepository::new();
    repo.save(token("aaaa")).await.unwrap();

    let result = repo.save(token("aaaa")).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::DuplicateValue))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_find_by_value_and_id() {
    let repo = InMemoryTokenRepository::new();
    let saved = repo.save(token("bbbb")).await.unwrap();

    assert_eq!(repo.find_by_value("bbbb").await.unwrap(), Some(saved.clone()));
    assert_eq!(repo.find_by_id(saved.id).await.unwrap(), Some(saved));
    assert!(repo.find_by_value("BBBB").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let repo = InMemoryTokenRepository::new();
    let mut older = token("old");
    older.created_at = Utc::now() - Duration::hours(2);
    repo.save(older).await.unwrap();
    repo.save(token("new")).await.unwrap();

    let all = repo.list_all().await.unwrap();
    assert_eq!(all[0].value, "new");
    assert_eq!(all[1].value, "old");
}

#[tokio::test]
async fn test_expire_stale_only_touches_active_past_expiry() {
    let repo = InMemoryTokenRepository::new();
    let stale = repo.save(token("stale")).await.unwrap();
    let fresh = repo.save(token("fresh")).await.unwrap();
    let used = repo.save(token("used")).await.unwrap();
    assert!(repo.mark_used(used.id, Utc::now()).await.unwrap());

    let later = stale.expires_at + Duration::seconds(1);
    let mut fresh_copy = repo.find_by_id(fresh.id).await.unwrap().unwrap();
    fresh_copy.expires_at = later + Duration::hours(1);
    repo.insert_raw(fresh_copy).await;

    assert_eq!(repo.expire_stale(later).await.unwrap(), 1);
    assert_eq!(
        repo.find_by_id(stale.id).await.unwrap().unwrap().status,
        TokenStatus::Expired
    );
    assert_eq!(
        repo.find_by_id(fresh.id).await.unwrap().unwrap().status,
        TokenStatus::Active
    );
    assert_eq!(
        repo.find_by_id(used.id).await.unwrap().unwrap().status,
        TokenStatus::Used
    );
    assert_eq!(repo.expire_stale(later).await.unwrap(), 0);
}

#[tokio::test]
async fn test_mark_used_is_conditional() {
    let repo = InMemoryTokenRepository::new();
    let saved = repo.save(token("cccc")).await.unwrap();
    let now = Utc::now();

    assert!(repo.mark_used(saved.id, now).await.unwrap());
    assert!(!repo.mark_used(saved.id, now + Duration::seconds(1)).await.unwrap());

    let stored = repo.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(stored.used_at, Some(now));

    let late = repo.save(token("dddd")).await.unwrap();
    assert!(!repo
        .mark_used(late.id, late.expires_at + Duration::seconds(1))
        .await
        .unwrap());
    assert!(!repo.mark_used(Uuid::new_v4(), now).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mark_used_has_single_winner() {
    let repo = Arc::new(InMemoryTokenRepository::new());
    let saved = repo.save(token("race")).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.mark_used(saved.id, Utc::now()).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_revoke_is_conditional() {
    let repo = InMemoryTokenRepository::new();
    let saved = repo.save(token("eeee")).await.unwrap();

    assert!(repo.revoke(saved.id).await.unwrap());
    assert!(!repo.revoke(saved.id).await.unwrap());
    assert!(!repo.revoke(Uuid::new_v4()).await.unwrap());
    assert_eq!(
        repo.find_by_id(saved.id).await.unwrap().unwrap().status,
        TokenStatus::Expired
    );
}
