//! Explicit validator functions run at the HTTP boundary.
//!
//! Each validator returns `Ok(())` or a human-readable explanation. Handlers
//! map failures to 400 before any service or repository logic runs.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum length of a report title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a report description or address.
pub const MAX_TEXT_LENGTH: usize = 2_000;

/// Minimum password length, matching the original sign-up policy.
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex is valid"))
}

/// Validate that a required free-text field is non-empty (after trimming)
/// and within the length limit.
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.chars().count() > max_len {
        return Err(format!("{field} must be at most {max_len} characters"));
    }
    Ok(())
}

/// Validate an email address shape. Not an RFC 5322 parser; rejects the
/// obviously malformed input the original DTO rejected.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("email must not be empty".to_string());
    }
    if !email_regex().is_match(email) {
        return Err(format!("'{email}' is not a valid email address"));
    }
    Ok(())
}

/// Validate password strength: at least [`MIN_PASSWORD_LENGTH`] characters
/// with at least one lowercase letter, one uppercase letter, and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }
    Ok(())
}
