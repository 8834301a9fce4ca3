//! Token value generation

use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::entities::access_token::TOKEN_VALUE_BYTES;

/// Generate an opaque token value: 128 bits from the OS CSPRNG, hex encoded
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; TOKEN_VALUE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
