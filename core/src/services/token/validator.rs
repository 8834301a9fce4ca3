//! Guardian-facing token validation and consumption

use std::collections::HashMap;
use std::sync::Arc;

use gp_shared::utils::mask_token;
use uuid::Uuid;

use crate::domain::entities::access_token::TokenStatus;
use crate::domain::value_objects::student_view::{GuardianReport, StudentRecord};
use crate::errors::{DomainError, TokenError, ValidationError};
use crate::repositories::{StudentRepository, SubjectRepository, TokenRepository};
use crate::services::clock::Clock;

/// Checks a presented token and, on first use, consumes it
///
/// A token is good for exactly one successful read. Repeated reads of a Used
/// token are rejected as gone.
pub struct TokenValidator {
    tokens: Arc<dyn TokenRepository>,
    students: Arc<dyn StudentRepository>,
    subjects: Arc<dyn SubjectRepository>,
    clock: Arc<dyn Clock>,
}

impl TokenValidator {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        students: Arc<dyn StudentRepository>,
        subjects: Arc<dyn SubjectRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tokens,
            students,
            subjects,
            clock,
        }
    }

    /// Validate a presented token value and return the guardian report
    ///
    /// # Returns
    ///
    /// * `Ok(GuardianReport)` - The token was Active and this call consumed it
    /// * `Err(ValidationError)` - No token value was presented
    /// * `Err(TokenError::Unknown)` - No such token (malformed values included)
    /// * `Err(TokenError::Gone)` - Expired, revoked, already used, or lost a concurrent race
    pub async fn validate(&self, presented: &str) -> Result<GuardianReport, DomainError> {
        let value = presented.trim();
        if value.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "token".to_string(),
            }
            .into());
        }

        let now = self.clock.now();
        let swept = self.tokens.expire_stale(now).await?;
        if swept > 0 {
            tracing::debug!(swept, "Expired stale guardian tokens");
        }

        let token = self
            .tokens
            .find_by_value(value)
            .await?
            .ok_or(TokenError::Unknown)?;

        // Stored status alone is not trusted; expiry is re-checked against the clock
        match token.effective_status(now) {
            TokenStatus::Active => {}
            status => {
                tracing::info!(
                    token_id = %token.id,
                    token = %mask_token(value),
                    status = %status,
                    "Rejected guardian token"
                );
                return Err(TokenError::Gone.into());
            }
        }

        let student = self
            .students
            .find_by_id(token.student_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "student".to_string(),
            })?;

        let subject_ids: Vec<Uuid> = student
            .semesters
            .iter()
            .flat_map(|s| s.subjects.iter().map(|p| p.subject_id))
            .collect();
        let catalogue: HashMap<_, _> = self
            .subjects
            .find_by_ids(&subject_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        if !self.tokens.mark_used(token.id, now).await? {
            tracing::warn!(
                token_id = %token.id,
                token = %mask_token(value),
                "Guardian token consumed concurrently"
            );
            return Err(TokenError::Gone.into());
        }

        tracing::info!(
            token_id = %token.id,
            student_id = %student.id,
            "Guardian token consumed"
        );

        Ok(GuardianReport {
            student: StudentRecord::resolve(&student, &catalogue),
            semester: token.semester,
            delivery_channel: token.delivery_channel,
            accessed_at: now,
        })
    }
}
