//! Phone number normalization
//!
//! Bookings store a single canonical international form so the same
//! number never appears as `00351 912...`, `912 345 678` and
//! `+351912345678` in three different rows.

use crate::utils::{AppError, AppResult};

const MIN_DIGITS: usize = 6;
const MAX_DIGITS: usize = 15; // E.164 upper bound

/// Normalize to `+<digits>`.
///
/// Rules, applied after stripping spaces, dashes, dots and parens:
/// - `+<digits>` is kept
/// - `00<digits>` becomes `+<digits>`
/// - bare digits get the default country code prefixed
pub fn normalize(raw: &str, default_country_code: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("customer_phone must not be empty"));
    }

    let has_plus = trimmed.starts_with('+');
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if trimmed
        .chars()
        .any(|c| !c.is_ascii_digit() && !matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'))
    {
        return Err(AppError::validation(format!(
            "customer_phone contains invalid characters: {raw}"
        )));
    }

    let canonical = if has_plus {
        digits
    } else if let Some(rest) = digits.strip_prefix("00") {
        rest.to_string()
    } else {
        format!("{default_country_code}{digits}")
    };

    if canonical.len() < MIN_DIGITS || canonical.len() > MAX_DIGITS {
        return Err(AppError::validation(format!(
            "customer_phone must have {MIN_DIGITS}-{MAX_DIGITS} digits, got {}",
            canonical.len()
        )));
    }

    Ok(format!("+{canonical}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_international_form() {
        assert_eq!(normalize("+351 912 345 678", "351").unwrap(), "+351912345678");
    }

    #[test]
    fn converts_double_zero_prefix() {
        assert_eq!(normalize("00351912345678", "351").unwrap(), "+351912345678");
    }

    #[test]
    fn prefixes_bare_national_numbers() {
        assert_eq!(normalize("912-345-678", "351").unwrap(), "+351912345678");
        assert_eq!(normalize("(91) 2345.678", "351").unwrap(), "+351912345678");
    }

    #[test]
    fn all_variants_collapse_to_one_form() {
        let forms = ["+351912345678", "00351 912 345 678", "912345678"];
        let normalized: Vec<_> = forms
            .iter()
            .map(|f| normalize(f, "351").unwrap())
            .collect();
        assert!(normalized.iter().all(|n| n == "+351912345678"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(normalize("", "351").is_err());
        assert!(normalize("   ", "351").is_err());
        assert!(normalize("call-me-maybe", "351").is_err());
        assert!(normalize("123", "351").is_err());
        assert!(normalize("12345678901234567890", "351").is_err());
    }
}
