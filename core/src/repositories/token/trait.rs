//! Token repository trait defining the interface for guardian access token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::access_token::AccessToken;
use crate::errors::DomainError;

/// Repository trait for AccessToken persistence operations
///
/// Tokens are never deleted. Every status change goes through a conditional
/// update that only applies while the stored status is still `Active`, so
/// concurrent writers cannot both win a transition.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a newly issued token
    ///
    /// # Arguments
    /// * `token` - The AccessToken entity to persist
    ///
    /// # Returns
    /// * `Ok(AccessToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token value)
    async fn save(&self, token: AccessToken) -> Result<AccessToken, DomainError>;

    /// Find a token by its bearer value (exact match)
    async fn find_by_value(&self, value: &str) -> Result<Option<AccessToken>, DomainError>;

    /// Find a token by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DomainError>;

    /// All tokens, newest first
    async fn list_all(&self) -> Result<Vec<AccessToken>, DomainError>;

    /// Lazy sweep: mark every Active token with `expires_at < now` as Expired
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens that changed status
    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Conditionally consume a token
    ///
    /// Sets `status = Used` and `used_at = now` only if the token is still Active
    /// and `now` has not passed `expires_at`.
    ///
    /// # Returns
    /// * `Ok(true)` - This caller won the transition
    /// * `Ok(false)` - The token was not Active (or no longer valid) at write time
    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Conditionally revoke a token (Active to Expired)
    ///
    /// # Returns
    /// * `Ok(true)` - Token was revoked
    /// * `Ok(false)` - Token was missing or not Active at write time
    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError>;
}
