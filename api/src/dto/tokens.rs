//! Request bodies and query strings of the token and notification routes

use serde::{Deserialize, Serialize};
use validator::Validate;

use gp_core::domain::{
    DeliveryChannel, IssueRequest, RecipientOverride, TokenFilter, TokenStatus, DEFAULT_SEMESTER,
};
use gp_core::errors::ValidationError;
use gp_core::services::TokenServiceConfig;

/// Contact override for one student
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDto {
    pub student_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<RecipientDto> for RecipientOverride {
    fn from(dto: RecipientDto) -> Self {
        RecipientOverride {
            student_id: dto.student_id,
            email: dto.email.filter(|e| !e.trim().is_empty()),
            phone: dto.phone.filter(|p| !p.trim().is_empty()),
        }
    }
}

/// Body of `POST /tokens`
///
/// ```json
/// {
///     "studentIds": ["6f1c..."],
///     "sentVia": "Email",
///     "semester": 3,
///     "expiry": "48 hours",
///     "deliver": true,
///     "recipients": [{ "studentId": "6f1c...", "email": "parent@example.com" }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokensRequest {
    #[validate(length(min = 1, message = "At least one student id is required"))]
    pub student_ids: Vec<String>,

    /// "Email", "SMS" or "Both"; Email when omitted
    pub sent_via: Option<String>,

    #[validate(range(min = 1, message = "Semester must be at least 1"))]
    pub semester: Option<u32>,

    /// One of "24 hours", "48 hours", "72 hours", "7 days"
    pub expiry: Option<String>,

    #[serde(default)]
    pub deliver: bool,

    #[serde(default)]
    pub recipients: Vec<RecipientDto>,
}

impl IssueTokensRequest {
    pub fn into_issue_request(
        self,
        config: &TokenServiceConfig,
    ) -> Result<IssueRequest, ValidationError> {
        let mut request = IssueRequest::new(self.student_ids)
            .with_channel(parse_channel(self.sent_via.as_deref())?)
            .with_semester(self.semester.unwrap_or(DEFAULT_SEMESTER))
            .with_expiry(config.resolve_expiry(self.expiry.as_deref())?);

        let recipients = self.recipients.into_iter().map(RecipientOverride::from).collect();
        if self.deliver {
            request = request.delivering(recipients);
        } else {
            request.recipients = recipients;
        }
        Ok(request)
    }
}

/// Body of `POST /notifications/send`
///
/// Every recipient gets a fresh token and the link is always delivered.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationsRequest {
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub recipients: Vec<RecipientDto>,

    pub sent_via: Option<String>,

    #[validate(range(min = 1, message = "Semester must be at least 1"))]
    pub semester: Option<u32>,

    pub expiry: Option<String>,
}

impl SendNotificationsRequest {
    pub fn into_issue_request(
        self,
        config: &TokenServiceConfig,
    ) -> Result<IssueRequest, ValidationError> {
        let student_ids = self.recipients.iter().map(|r| r.student_id.clone()).collect();
        let recipients = self.recipients.into_iter().map(RecipientOverride::from).collect();

        Ok(IssueRequest::new(student_ids)
            .with_channel(parse_channel(self.sent_via.as_deref())?)
            .with_semester(self.semester.unwrap_or(DEFAULT_SEMESTER))
            .with_expiry(config.resolve_expiry(self.expiry.as_deref())?)
            .delivering(recipients))
    }
}

/// Query of `GET /tokens/validate`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTokenQuery {
    pub token: Option<String>,
}

/// Query of `GET /tokens`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTokensQuery {
    /// "Active", "Used", "Expired"; empty or "All" lists every status
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListTokensQuery {
    pub fn into_filter(self) -> Result<TokenFilter, ValidationError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse::<TokenStatus>().map_err(|_| {
                ValidationError::InvalidFormat {
                    field: "status".to_string(),
                }
            })?),
        };
        Ok(TokenFilter {
            status,
            search: self.search.filter(|s| !s.trim().is_empty()),
        })
    }
}

fn parse_channel(value: Option<&str>) -> Result<DeliveryChannel, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DeliveryChannel::default()),
        Some(v) => v.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "sentVia".to_string(),
        }),
    }
}
