//! Administrator credential verification

mod verifier;

pub use verifier::{AdminTokenVerifier, ADMIN_TOKEN_TTL_HOURS};
