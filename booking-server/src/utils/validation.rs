//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied at the handler boundary.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: venue, shift, event type, package, menu, user, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Phone numbers (before normalization)
pub const MAX_PHONE_LEN: usize = 32;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an email address: single `@`, non-empty local and domain parts.
///
/// Full RFC validation is a losing game; the verification email is the
/// real check.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None)
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') =>
        {
            Ok(())
        }
        _ => Err(AppError::validation(format!(
            "email is not a valid address: {email}"
        ))),
    }
}

/// Validate a password before hashing.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

/// Validate a positive integer field (capacity, guest_count, ...).
pub fn validate_positive(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Validate a non-negative integer field (free_limit, ...).
pub fn validate_non_negative(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Validate a money amount is finite and non-negative.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("Grand Hall", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(300), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice@@example.com").is_err());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@nodot").is_err());
    }

    #[test]
    fn amounts() {
        assert!(validate_amount(0.0, "base_price").is_ok());
        assert!(validate_amount(-1.0, "base_price").is_err());
        assert!(validate_amount(f64::NAN, "base_price").is_err());
        assert!(validate_amount(f64::INFINITY, "base_price").is_err());
    }
}
