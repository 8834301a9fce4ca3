//! Guardian access token configuration

use serde::{Deserialize, Serialize};

/// Settings for issuing and presenting guardian links
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Origin of the guardian-facing frontend, used to build report links
    pub frontend_url: String,

    /// Reject unknown `expiry` labels instead of falling back to 24 hours
    pub strict_expiry: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            frontend_url: String::from("http://localhost:5173"),
            strict_expiry: false,
        }
    }
}

impl TokenConfig {
    /// Build the guardian URL for a token value
    pub fn guardian_url(&self, token_value: &str) -> String {
        format!(
            "{}/guardian?token={}",
            self.frontend_url.trim_end_matches('/'),
            token_value
        )
    }
}
