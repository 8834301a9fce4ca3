//! Admin-facing token listing and revocation

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::access_token::TokenStatus;
use crate::domain::value_objects::admin::AdminContext;
use crate::domain::value_objects::issuance::{TokenFilter, TokenView};
use crate::domain::value_objects::student_view::StudentSummary;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{StudentRepository, TokenRepository};
use crate::services::clock::Clock;

/// Token store operations for administrators
///
/// Every read runs the lazy sweep first so listed statuses reflect the clock.
pub struct TokenRegistry {
    tokens: Arc<dyn TokenRepository>,
    students: Arc<dyn StudentRepository>,
    clock: Arc<dyn Clock>,
}

impl TokenRegistry {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        students: Arc<dyn StudentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tokens,
            students,
            clock,
        }
    }

    /// Expire every Active token past its expiry
    pub async fn sweep(&self) -> Result<usize, DomainError> {
        let swept = self.tokens.expire_stale(self.clock.now()).await?;
        if swept > 0 {
            tracing::info!(swept, "Expired stale guardian tokens");
        }
        Ok(swept)
    }

    /// List tokens newest first, joined with student summaries
    pub async fn list_tokens(
        &self,
        admin: &AdminContext,
        filter: &TokenFilter,
    ) -> Result<Vec<TokenView>, DomainError> {
        self.sweep().await?;

        let tokens = self.tokens.list_all().await?;
        let student_ids: Vec<Uuid> = tokens
            .iter()
            .map(|t| t.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let summaries: HashMap<Uuid, StudentSummary> = self
            .students
            .find_by_ids(&student_ids)
            .await?
            .iter()
            .map(|s| (s.id, StudentSummary::from(s)))
            .collect();

        let views: Vec<TokenView> = tokens
            .into_iter()
            .map(|t| {
                let summary = summaries.get(&t.student_id).cloned();
                TokenView::new(t, summary)
            })
            .filter(|view| filter.matches(view))
            .collect();

        tracing::debug!(admin_id = %admin.admin_id, count = views.len(), "Listed guardian tokens");
        Ok(views)
    }

    /// Revoke an Active token (Active to Expired)
    ///
    /// # Returns
    ///
    /// * `Ok(TokenView)` - The revoked token
    /// * `Err(TokenError::NotFound)` - No token with this id
    /// * `Err(TokenError::NotActive)` - Already Used or Expired; nothing changed
    pub async fn revoke(&self, admin: &AdminContext, id: Uuid) -> Result<TokenView, DomainError> {
        self.sweep().await?;

        let token = self
            .tokens
            .find_by_id(id)
            .await?
            .ok_or(TokenError::NotFound)?;
        if token.status != TokenStatus::Active {
            return Err(TokenError::NotActive {
                status: token.status,
            }
            .into());
        }

        if !self.tokens.revoke(id).await? {
            // Lost a race with a guardian read or the sweep
            let status = self
                .tokens
                .find_by_id(id)
                .await?
                .map(|t| t.status)
                .unwrap_or(TokenStatus::Expired);
            return Err(TokenError::NotActive { status }.into());
        }

        let revoked = self
            .tokens
            .find_by_id(id)
            .await?
            .ok_or(TokenError::NotFound)?;
        let summary = self
            .students
            .find_by_id(revoked.student_id)
            .await?
            .as_ref()
            .map(StudentSummary::from);

        tracing::info!(admin_id = %admin.admin_id, token_id = %id, "Guardian token revoked");
        Ok(TokenView::new(revoked, summary))
    }
}
