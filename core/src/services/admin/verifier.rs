//! Admin JWT verification (HS256)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use gp_shared::AuthConfig;

use crate::domain::value_objects::admin::{AdminClaims, AdminContext};
use crate::errors::{DomainError, TokenError};

/// Lifetime of admin tokens minted by [`AdminTokenVerifier::issue`]
pub const ADMIN_TOKEN_TTL_HOURS: i64 = 12;

/// Verifies admin bearer tokens and turns them into an [`AdminContext`]
///
/// Session management happens elsewhere; this only checks signature, issuer,
/// audience and expiry.
#[derive(Clone)]
pub struct AdminTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl AdminTokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Verify a bearer token
    ///
    /// # Returns
    ///
    /// * `Ok(AdminContext)` - Token is valid
    /// * `Err(DomainError::Unauthorized)` - Bad signature, claims or expiry
    pub fn verify(&self, token: &str) -> Result<AdminContext, DomainError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Admin token rejected");
            DomainError::Unauthorized
        })?;
        Ok(AdminContext::from(data.claims))
    }

    /// Mint an admin token (used by the login flow and by tests)
    pub fn issue(&self, admin_id: &str, email: Option<String>) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: admin_id.to_string(),
            email,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (now + Duration::hours(ADMIN_TOKEN_TTL_HOURS)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let verifier = AdminTokenVerifier::new(&AuthConfig::default());
        let token = verifier
            .issue("admin-1", Some("registrar@example.edu".to_string()))
            .unwrap();

        let admin = verifier.verify(&token).unwrap();
        assert_eq!(admin.admin_id, "admin-1");
        assert_eq!(admin.email.as_deref(), Some("registrar@example.edu"));
    }

    #[test]
    fn test_rejects_other_secret_and_garbage() {
        let verifier = AdminTokenVerifier::new(&AuthConfig::default());
        let other = AdminTokenVerifier::new(&AuthConfig {
            jwt_secret: "another-secret-of-sufficient-length".to_string(),
            ..AuthConfig::default()
        });
        let token = other.issue("admin-1", None).unwrap();

        assert!(matches!(verifier.verify(&token), Err(DomainError::Unauthorized)));
        assert!(matches!(verifier.verify("not.a.jwt"), Err(DomainError::Unauthorized)));
    }

    #[test]
    fn test_rejects_wrong_audience() {
        let verifier = AdminTokenVerifier::new(&AuthConfig::default());
        let foreign = AdminTokenVerifier::new(&AuthConfig {
            audience: "another-app".to_string(),
            ..AuthConfig::default()
        });
        let token = foreign.issue("admin-1", None).unwrap();
        assert!(verifier.verify(&token).is_err());
    }
}
