//! Requests and per-item results of guardian token issuance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gp_shared::BatchSummary;

use crate::domain::entities::access_token::{
    AccessToken, DeliveryChannel, ExpiryOption, TokenStatus,
};
use crate::domain::value_objects::student_view::StudentSummary;

/// Contact override for one student in a send request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientOverride {
    pub student_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Batch issuance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    /// Raw identifiers as received; malformed ones are reported per item
    pub student_ids: Vec<String>,
    pub delivery_channel: DeliveryChannel,
    pub semester: u32,
    pub expiry: ExpiryOption,

    /// Dispatch the guardian link after creating each token
    pub deliver: bool,

    /// Contacts that take precedence over the stored guardian contacts
    pub recipients: Vec<RecipientOverride>,
}

impl IssueRequest {
    pub fn new(student_ids: Vec<String>) -> Self {
        Self {
            student_ids,
            delivery_channel: DeliveryChannel::default(),
            semester: crate::domain::entities::access_token::DEFAULT_SEMESTER,
            expiry: ExpiryOption::default(),
            deliver: false,
            recipients: Vec::new(),
        }
    }

    pub fn with_channel(mut self, channel: DeliveryChannel) -> Self {
        self.delivery_channel = channel;
        self
    }

    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = semester;
        self
    }

    pub fn with_expiry(mut self, expiry: ExpiryOption) -> Self {
        self.expiry = expiry;
        self
    }

    /// Request delivery, using `recipients` before stored contacts
    pub fn delivering(mut self, recipients: Vec<RecipientOverride>) -> Self {
        self.deliver = true;
        self.recipients = recipients;
        self
    }

    pub fn recipient_for(&self, student_id: &str) -> Option<&RecipientOverride> {
        self.recipients
            .iter()
            .find(|r| r.student_id.trim() == student_id)
    }
}

/// Token joined with the student it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
    pub id: Uuid,
    pub value: String,
    pub delivery_channel: DeliveryChannel,
    pub semester: u32,
    pub status: TokenStatus,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,

    /// `None` when the student record no longer exists
    pub student: Option<StudentSummary>,
}

impl TokenView {
    pub fn new(token: AccessToken, student: Option<StudentSummary>) -> Self {
        Self {
            id: token.id,
            value: token.value,
            delivery_channel: token.delivery_channel,
            semester: token.semester,
            status: token.status,
            expires_at: token.expires_at,
            used_at: token.used_at,
            created_at: token.created_at,
            student,
        }
    }
}

/// Token listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFilter {
    pub status: Option<TokenStatus>,

    /// Case-insensitive match on student name, URN, CRN or token value
    pub search: Option<String>,
}

impl TokenFilter {
    pub fn matches(&self, view: &TokenView) -> bool {
        if let Some(status) = self.status {
            if view.status != status {
                return false;
            }
        }
        let Some(query) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        if view.value.to_lowercase().contains(&needle) {
            return true;
        }
        match &view.student {
            Some(student) => {
                student.full_name.to_lowercase().contains(&needle)
                    || student.urn.to_string().contains(&needle)
                    || student.crn.to_string().contains(&needle)
            }
            None => false,
        }
    }
}

/// Outcome of one delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelStatus {
    NotRequested,
    Sent,
    Failed,
}

/// Error attached to a per-item result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Delivery result for a created token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub email: ChannelStatus,
    pub sms: ChannelStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl DeliveryOutcome {
    pub fn not_requested() -> Self {
        Self {
            email: ChannelStatus::NotRequested,
            sms: ChannelStatus::NotRequested,
            errors: Vec::new(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.email == ChannelStatus::Failed || self.sms == ChannelStatus::Failed
    }
}

/// Result for one requested student identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum IssuanceItem {
    /// Token stored; delivery may still have failed
    Created {
        token: TokenView,
        #[serde(rename = "guardianUrl")]
        guardian_url: String,
        delivery: DeliveryOutcome,
    },
    /// No token was created for this identifier
    Failed {
        #[serde(rename = "studentId")]
        student_id: String,
        error: ItemError,
    },
}

impl IssuanceItem {
    /// Created with no delivery failure
    pub fn is_success(&self) -> bool {
        match self {
            IssuanceItem::Created { delivery, .. } => !delivery.has_failures(),
            IssuanceItem::Failed { .. } => false,
        }
    }

    pub fn token(&self) -> Option<&TokenView> {
        match self {
            IssuanceItem::Created { token, .. } => Some(token),
            IssuanceItem::Failed { .. } => None,
        }
    }
}

/// Per-item report of a batch issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceReport {
    pub summary: BatchSummary,

    /// Tokens stored, including those whose delivery failed
    pub created: usize,

    pub items: Vec<IssuanceItem>,
}

impl IssuanceReport {
    pub fn from_items(items: Vec<IssuanceItem>) -> Self {
        let successful = items.iter().filter(|i| i.is_success()).count();
        let created = items.iter().filter(|i| i.token().is_some()).count();
        Self {
            summary: BatchSummary {
                total: items.len(),
                successful,
                failed: items.len() - successful,
            },
            created,
            items,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenView> {
        self.items.iter().filter_map(IssuanceItem::token)
    }
}
