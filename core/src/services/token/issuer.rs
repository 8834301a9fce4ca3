//! Batch issuance of guardian access tokens

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use uuid::Uuid;

use crate::domain::entities::access_token::AccessToken;
use crate::domain::entities::student::Student;
use crate::domain::value_objects::admin::AdminContext;
use crate::domain::value_objects::issuance::{
    DeliveryOutcome, IssuanceItem, IssuanceReport, IssueRequest, ItemError, TokenView,
};
use crate::domain::value_objects::student_view::StudentSummary;
use crate::errors::{DomainError, TokenError, ValidationError};
use crate::repositories::{StudentRepository, TokenRepository};
use crate::services::clock::Clock;
use crate::services::notification::NotificationDispatcher;

use super::config::TokenServiceConfig;
use super::generator::generate_token_value;

/// Mints one token per requested student and optionally delivers the links
///
/// Each requested identifier yields exactly one item in the report. A delivery
/// failure never removes the stored token.
pub struct TokenIssuer {
    tokens: Arc<dyn TokenRepository>,
    students: Arc<dyn StudentRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl TokenIssuer {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        students: Arc<dyn StudentRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            tokens,
            students,
            dispatcher,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issue tokens for a batch of students
    ///
    /// # Arguments
    ///
    /// * `admin` - Administrator triggering the issuance
    /// * `request` - Students, channel, semester, validity and delivery options
    ///
    /// # Returns
    ///
    /// * `Ok(IssuanceReport)` - One item per requested identifier
    /// * `Err(DomainError)` - The request as a whole is invalid or the student store failed
    pub async fn issue(
        &self,
        admin: &AdminContext,
        request: IssueRequest,
    ) -> Result<IssuanceReport, DomainError> {
        if request.student_ids.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "studentIds".to_string(),
            }
            .into());
        }
        if request.semester == 0 {
            return Err(ValidationError::OutOfRange {
                field: "semester".to_string(),
                min: "1".to_string(),
                max: "-".to_string(),
            }
            .into());
        }

        let parsed: Vec<(String, Option<Uuid>)> = request
            .student_ids
            .iter()
            .map(|raw| {
                let raw = raw.trim().to_string();
                let id = Uuid::parse_str(&raw).ok();
                (raw, id)
            })
            .collect();

        let ids: Vec<Uuid> = parsed.iter().filter_map(|(_, id)| *id).collect();
        let students: HashMap<Uuid, Student> = self
            .students
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let items = join_all(parsed.iter().map(|(raw, id)| {
            let student = id.and_then(|id| students.get(&id));
            self.issue_one(raw, *id, student, &request)
        }))
        .await;

        let report = IssuanceReport::from_items(items);
        tracing::info!(
            admin_id = %admin.admin_id,
            requested = report.summary.total,
            created = report.created,
            failed = report.summary.failed,
            channel = %request.delivery_channel,
            deliver = request.deliver,
            "Guardian tokens issued"
        );
        Ok(report)
    }

    async fn issue_one(
        &self,
        raw_id: &str,
        id: Option<Uuid>,
        student: Option<&Student>,
        request: &IssueRequest,
    ) -> IssuanceItem {
        let failed = |error: ItemError| IssuanceItem::Failed {
            student_id: raw_id.to_string(),
            error,
        };

        if id.is_none() {
            let err = ValidationError::InvalidFormat {
                field: "studentIds".to_string(),
            };
            return failed(ItemError::new(err.code(), format!("Invalid student id '{}'", raw_id)));
        }
        let Some(student) = student else {
            return failed(ItemError::new(
                gp_shared::error_codes::STUDENT_NOT_FOUND,
                "Student not found",
            ));
        };

        let token = match self.create_token(student.id, request).await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(student_id = %student.id, error = %err, "Failed to store guardian token");
                return failed(ItemError::new(err.code(), err.to_string()));
            }
        };

        let guardian_url = self.config.guardian_url(&token.value);
        let delivery = if request.deliver {
            self.dispatcher
                .deliver(
                    student,
                    request.recipient_for(raw_id),
                    request.delivery_channel,
                    request.semester,
                    &guardian_url,
                )
                .await
        } else {
            DeliveryOutcome::not_requested()
        };

        IssuanceItem::Created {
            token: TokenView::new(token, Some(StudentSummary::from(student))),
            guardian_url,
            delivery,
        }
    }

    /// Persist a new token, regenerating the value on the (unlikely) collision
    async fn create_token(
        &self,
        student_id: Uuid,
        request: &IssueRequest,
    ) -> Result<AccessToken, DomainError> {
        let mut last_error = DomainError::from(TokenError::GenerationFailed);
        for _ in 0..self.config.max_value_attempts.max(1) {
            let token = AccessToken::new(
                student_id,
                generate_token_value(),
                request.delivery_channel,
                request.semester,
                request.expiry,
                self.clock.now(),
            );
            match self.tokens.save(token).await {
                Ok(saved) => return Ok(saved),
                Err(DomainError::Token(TokenError::DuplicateValue)) => {
                    tracing::warn!(student_id = %student_id, "Token value collision, regenerating");
                    last_error = TokenError::DuplicateValue.into();
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }
}
