//! Shared utilities and common types for the Guardian Portal server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Masking and contact validation helpers
//! - API response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, MailConfig, ServerConfig,
    SmsConfig, StorageBackend, StorageConfig, TokenConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, BatchSummary};
pub use utils::{mask, validation};
