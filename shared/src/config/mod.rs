//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Admin JWT verification settings
//! - `database` - Database connection and storage backend selection
//! - `environment` - Environment detection
//! - `notification` - SMTP and SMS delivery channels
//! - `server` - HTTP server and CORS configuration
//! - `tokens` - Guardian access token issuance settings

pub mod auth;
pub mod database;
pub mod environment;
pub mod notification;
pub mod server;
pub mod tokens;

use serde::{Deserialize, Serialize};

pub use auth::AuthConfig;
pub use database::{DatabaseConfig, StorageBackend, StorageConfig};
pub use environment::Environment;
pub use notification::{MailConfig, SmsConfig};
pub use server::{CorsConfig, ServerConfig};
pub use tokens::TokenConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Persistence backend selection
    pub storage: StorageConfig,

    /// Admin authentication configuration
    pub auth: AuthConfig,

    /// Guardian token configuration
    pub tokens: TokenConfig,

    /// Email delivery configuration
    pub mail: MailConfig,

    /// SMS delivery configuration
    pub sms: SmsConfig,
}

impl AppConfig {
    /// Check whether the loaded configuration is unsafe for production use.
    ///
    /// Returns a list of human readable warnings; empty when the configuration looks sane.
    pub fn production_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.environment.is_production() {
            return warnings;
        }
        if self.auth.is_using_default_secret() {
            warnings.push("auth.jwt_secret is still the development default".to_string());
        }
        if self.storage.backend == StorageBackend::Memory {
            warnings.push("storage.backend is 'memory'; tokens will not survive a restart".to_string());
        }
        if self.sms.provider == "mock" || self.mail.provider == "mock" {
            warnings.push("a mock notification provider is configured".to_string());
        }
        warnings
    }
}
