//! In-memory implementation of TokenRepository
//!
//! Backs the `memory` storage backend and the test suites. Conditional updates
//! check and write under a single write lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::access_token::{AccessToken, TokenStatus};
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// In-memory token repository keyed by token id
#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, AccessToken>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token without any checks (test seeding)
    pub async fn insert_raw(&self, token: AccessToken) {
        self.tokens.write().await.insert(token.id, token);
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save(&self, token: AccessToken) -> Result<AccessToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.values().any(|t| t.value == token.value) || tokens.contains_key(&token.id) {
            return Err(TokenError::DuplicateValue.into());
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<AccessToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.value == value).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<AccessToken>, DomainError> {
        let tokens = self.tokens.read().await;
        let mut all: Vec<AccessToken> = tokens.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut swept = 0;
        for token in tokens.values_mut() {
            if token.sweep(now) {
                swept += 1;
            }
        }
        Ok(swept)
    }

    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(&id) {
            Some(token) if token.status == TokenStatus::Active && !token.is_expired_at(now) => {
                token.status = TokenStatus::Used;
                token.used_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(&id) {
            Some(token) => Ok(token.revoke().is_ok()),
            None => Ok(false),
        }
    }
}
