//! Masking helpers for logging credentials and guardian contact details

/// Mask a bearer token for logs, keeping only the first 6 characters
///
/// ```
/// use gp_shared::utils::mask_token;
/// assert_eq!(mask_token("0123456789abcdef"), "012345…");
/// ```
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    if visible.len() == token.len() {
        "*".repeat(token.len())
    } else {
        format!("{}…", visible)
    }
}

/// Mask an email address (e.g., "j***@example.edu")
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Mask a phone number for display, showing only the last 4 digits
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let last_digits: String = chars[chars.len() - 4..].iter().collect();
    let masked_count = chars.len() - 4;

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("9f86d081884c7d65"), "9f86d0…");
        assert_eq!(mask_token("abc"), "***");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("guardian@example.edu"), "g***@example.edu");
        assert_eq!(mask_email("not-an-email"), "***");
        assert_eq!(mask_email("@example.edu"), "***");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+919876543210"), "+********3210");
        assert_eq!(mask_phone_number("9876543210"), "******3210");
        assert_eq!(mask_phone_number("123"), "***");
    }
}
