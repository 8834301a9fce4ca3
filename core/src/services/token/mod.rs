//! Guardian token services
//!
//! - Issuance of single-use report links for a batch of students
//! - Guardian-side validation with an atomic first-use transition
//! - Admin listing and revocation, each preceded by the lazy expiry sweep

mod config;
mod generator;
mod issuer;
mod registry;
mod validator;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use generator::generate_token_value;
pub use issuer::TokenIssuer;
pub use registry::TokenRegistry;
pub use validator::TokenValidator;
