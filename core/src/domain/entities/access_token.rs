//! Guardian access token entity and its status state machine.
//!
//! A token grants a guardian one read of a student's academic report. Status only
//! moves forward: `Active` becomes `Used` on first successful read, or `Expired`
//! when time runs out or an administrator revokes it. Both are terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Semester used when a request omits it
pub const DEFAULT_SEMESTER: u32 = 1;

/// Length in bytes of the random material behind a token value (128 bits)
pub const TOKEN_VALUE_BYTES: usize = 16;

/// Lifecycle status of an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStatus {
    Active,
    Used,
    Expired,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::Active => "Active",
            TokenStatus::Used => "Used",
            TokenStatus::Expired => "Expired",
        }
    }

    /// Used and Expired never transition again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TokenStatus::Active)
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TokenStatus::Active),
            "used" => Ok(TokenStatus::Used),
            "expired" => Ok(TokenStatus::Expired),
            other => Err(format!("Unknown token status: {}", other)),
        }
    }
}

/// Channel the guardian link was (or will be) sent through
///
/// Informational only; it never affects validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryChannel {
    #[default]
    Email,
    #[serde(rename = "SMS")]
    Sms,
    Both,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Email => "Email",
            DeliveryChannel::Sms => "SMS",
            DeliveryChannel::Both => "Both",
        }
    }

    pub fn includes_email(&self) -> bool {
        matches!(self, DeliveryChannel::Email | DeliveryChannel::Both)
    }

    pub fn includes_sms(&self) -> bool {
        matches!(self, DeliveryChannel::Sms | DeliveryChannel::Both)
    }
}

impl fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(DeliveryChannel::Email),
            "sms" => Ok(DeliveryChannel::Sms),
            "both" => Ok(DeliveryChannel::Both),
            other => Err(format!("Unknown delivery channel: {}", other)),
        }
    }
}

/// Allowed validity windows for a guardian link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryOption {
    #[default]
    Hours24,
    Hours48,
    Hours72,
    Days7,
}

impl ExpiryOption {
    pub const ALL: [ExpiryOption; 4] = [
        ExpiryOption::Hours24,
        ExpiryOption::Hours48,
        ExpiryOption::Hours72,
        ExpiryOption::Days7,
    ];

    /// Parse a request label such as "48 hours" or "7 days"
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(label))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryOption::Hours24 => "24 hours",
            ExpiryOption::Hours48 => "48 hours",
            ExpiryOption::Hours72 => "72 hours",
            ExpiryOption::Days7 => "7 days",
        }
    }

    pub fn hours(&self) -> i64 {
        match self {
            ExpiryOption::Hours24 => 24,
            ExpiryOption::Hours48 => 48,
            ExpiryOption::Hours72 => 72,
            ExpiryOption::Days7 => 168,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(self.hours())
    }
}

/// Single-use, time-boxed guardian access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Unique identifier of the token record
    pub id: Uuid,

    /// Opaque bearer value embedded in the guardian URL
    pub value: String,

    /// Student whose report this token unlocks
    pub student_id: Uuid,

    pub delivery_channel: DeliveryChannel,

    /// Semester the notification was about
    pub semester: u32,

    pub status: TokenStatus,

    /// After this instant the token is expired regardless of stored status
    pub expires_at: DateTime<Utc>,

    /// Set once, on the Active to Used transition
    pub used_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a new active token
    ///
    /// # Arguments
    ///
    /// * `student_id` - Student the token grants access to
    /// * `value` - Pre-generated random token value
    /// * `delivery_channel` - How the link is delivered
    /// * `semester` - Semester context of the notification
    /// * `expiry` - Validity window
    /// * `now` - Issuance instant from the server clock
    pub fn new(
        student_id: Uuid,
        value: String,
        delivery_channel: DeliveryChannel,
        semester: u32,
        expiry: ExpiryOption,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            student_id,
            delivery_channel,
            semester,
            status: TokenStatus::Active,
            expires_at: now + expiry.duration(),
            used_at: None,
            created_at: now,
        }
    }

    /// Strictly after `expires_at`; there is no grace period
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Status as it should be observed at `now`, without mutating the record
    pub fn effective_status(&self, now: DateTime<Utc>) -> TokenStatus {
        if self.status == TokenStatus::Active && self.is_expired_at(now) {
            TokenStatus::Expired
        } else {
            self.status
        }
    }

    /// Whether the lazy sweep must move this token to Expired
    pub fn needs_sweep(&self, now: DateTime<Utc>) -> bool {
        self.status == TokenStatus::Active && self.is_expired_at(now)
    }

    /// Apply the lazy sweep. Returns `true` when the status changed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> bool {
        if self.needs_sweep(now) {
            self.status = TokenStatus::Expired;
            true
        } else {
            false
        }
    }

    /// Consume the token on a guardian read
    ///
    /// Succeeds only for an Active token that has not passed its expiry. An Active
    /// token found past its expiry is moved to Expired before the error is returned.
    ///
    /// # Returns
    ///
    /// `Ok(())` after the Active to Used transition, `Err(TokenError::Gone)` otherwise
    pub fn consume(&mut self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if self.sweep(now) {
            return Err(TokenError::Gone);
        }
        match self.status {
            TokenStatus::Active => {
                self.status = TokenStatus::Used;
                self.used_at = Some(now);
                Ok(())
            }
            TokenStatus::Used | TokenStatus::Expired => Err(TokenError::Gone),
        }
    }

    /// Revoke an active token
    pub fn revoke(&mut self) -> Result<(), TokenError> {
        match self.status {
            TokenStatus::Active => {
                self.status = TokenStatus::Expired;
                Ok(())
            }
            status => Err(TokenError::NotActive { status }),
        }
    }
}
