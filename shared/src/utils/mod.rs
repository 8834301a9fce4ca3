//! Common utility functions

pub mod mask;
pub mod validation;

pub use mask::{mask_email, mask_phone_number, mask_token};
pub use validation::{is_valid_email, is_valid_phone_number, normalize_phone_number};
