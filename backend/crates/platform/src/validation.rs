//! Input validation predicates
//!
//! Pure functions shared by every workflow. They answer yes/no; the caller
//! decides which error message to surface.

use crate::password;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Digits allowed before the decimal point of a stored amount
pub const MAX_INTEGER_DIGITS: usize = 10;

/// Digits allowed after the decimal point of a stored amount
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Non-empty after trimming surrounding whitespace
pub fn is_non_empty_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Basic email format validation
///
/// Exactly one `@`, a non-empty local part of at most 64 bytes and a dotted
/// domain made of ASCII alphanumerics, dots and hyphens.
pub fn is_valid_email(email: &str) -> bool {
    if !is_non_empty_string(email) {
        return false;
    }

    let email = email.trim();
    if email.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) || domain.contains("..") {
        return false;
    }

    true
}

/// Password composition policy, see [`password::check_policy`]
pub fn is_valid_password(value: &str) -> bool {
    password::check_policy(value).is_ok()
}

/// Fits a `DECIMAL(10,2)`-class column
///
/// Finite, non-negative, at most [`MAX_INTEGER_DIGITS`] digits before the
/// point and [`MAX_FRACTION_DIGITS`] after it, judged on the shortest
/// decimal rendering of the value.
pub fn is_valid_number(number: f64) -> bool {
    if !number.is_finite() || number < 0.0 {
        return false;
    }

    // abs() folds -0.0 into 0.0 so it renders as "0"
    let rendered = number.abs().to_string();
    match rendered.split_once('.') {
        None => rendered.len() <= MAX_INTEGER_DIGITS,
        Some((integer, fraction)) => {
            integer.len() <= MAX_INTEGER_DIGITS && fraction.len() <= MAX_FRACTION_DIGITS
        }
    }
}
