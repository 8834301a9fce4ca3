//! Configuration for the guardian token services

use gp_shared::TokenConfig;

use crate::domain::entities::access_token::ExpiryOption;
use crate::errors::ValidationError;

/// Configuration for the token services
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Origin of the guardian frontend
    pub frontend_url: String,
    /// Reject unknown expiry labels instead of defaulting to 24 hours
    pub strict_expiry: bool,
    /// Attempts at generating a non-colliding token value
    pub max_value_attempts: usize,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&TokenConfig::default())
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            frontend_url: config.frontend_url.clone(),
            strict_expiry: config.strict_expiry,
            max_value_attempts: 3,
        }
    }
}

impl TokenServiceConfig {
    /// Guardian URL embedding a token value
    pub fn guardian_url(&self, token_value: &str) -> String {
        format!(
            "{}/guardian?token={}",
            self.frontend_url.trim_end_matches('/'),
            token_value
        )
    }

    /// Map a requested expiry label to a validity window
    ///
    /// A missing label means 24 hours. An unrecognized label also means 24 hours
    /// unless strict mode is on, in which case it is rejected.
    pub fn resolve_expiry(&self, label: Option<&str>) -> Result<ExpiryOption, ValidationError> {
        let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
            return Ok(ExpiryOption::default());
        };
        match ExpiryOption::from_label(label) {
            Some(option) => Ok(option),
            None if self.strict_expiry => Err(ValidationError::UnsupportedExpiry {
                value: label.to_string(),
            }),
            None => {
                tracing::warn!(expiry = %label, "Unrecognized expiry label, defaulting to 24 hours");
                Ok(ExpiryOption::default())
            }
        }
    }
}
