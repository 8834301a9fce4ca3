//! Authenticated administrator identity.

use serde::{Deserialize, Serialize};

/// Administrator on whose behalf an admin operation runs
///
/// Passed explicitly into every admin-facing service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminContext {
    /// Subject of the verified admin credential
    pub admin_id: String,

    pub email: Option<String>,
}

impl AdminContext {
    pub fn new(admin_id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            admin_id: admin_id.into(),
            email,
        }
    }
}

/// Claims carried by an admin JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin identifier
    pub sub: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub iss: String,
    pub aud: String,

    /// Expiration time (as UTC timestamp)
    pub exp: i64,

    /// Issued at (as UTC timestamp)
    pub iat: i64,
}

impl From<AdminClaims> for AdminContext {
    fn from(claims: AdminClaims) -> Self {
        AdminContext {
            admin_id: claims.sub,
            email: claims.email,
        }
    }
}
