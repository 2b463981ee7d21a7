//! Password Hashing and Verification
//!
//! Staff password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//! - Composition policy for newly chosen passwords
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Pepper support for additional security layer

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols accepted (and one of which is required) in a new password
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+={}[]|\\:;\"'<>,.?/~`-";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// No ASCII uppercase letter
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    /// No ASCII digit
    #[error("Password must contain at least one digit")]
    MissingDigit,

    /// No symbol from [`PASSWORD_SYMBOLS`]
    #[error("Password must contain at least one special symbol")]
    MissingSymbol,

    /// Anything other than ASCII letters, digits and [`PASSWORD_SYMBOLS`]
    #[error("Password may only contain letters, digits and special symbols")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Check a candidate password against the composition policy
///
/// At least [`MIN_PASSWORD_LENGTH`] characters, one uppercase letter, one
/// digit and one symbol from [`PASSWORD_SYMBOLS`]; nothing outside
/// letters, digits and those symbols.
pub fn check_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password.trim().is_empty() {
        return Err(PasswordPolicyError::EmptyOrWhitespace);
    }

    if password
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c)))
    {
        return Err(PasswordPolicyError::InvalidCharacter);
    }

    let char_count = password.chars().count();
    if char_count < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: char_count,
        });
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(PasswordPolicyError::MissingSymbol);
    }

    Ok(())
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Secure#Pass1".to_string()).unwrap();
/// // Password is automatically zeroized when dropped
/// # drop(password);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new password chosen by a user, enforcing [`check_policy`]
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let candidate = Self::for_verification(raw);
        check_policy(&candidate.0)?;
        Ok(candidate)
    }

    /// Wrap a submitted password for comparison against a stored hash
    ///
    /// No policy is applied: login must not reveal which rule a stored
    /// password would fail.
    pub fn for_verification(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut combined = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret for additional security
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);

        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));
        password_bytes.zeroize();

        Ok(HashedPassword {
            hash: hash?.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashedPassword};
///
/// let password = ClearTextPassword::new("Secure#Pass1".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
///
/// // Later, verify
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Uses constant-time comparison to prevent timing attacks.
    ///
    /// ## Arguments
    /// * `password` - The clear text password to verify
    /// * `pepper` - Optional pepper (must match the one used during hashing)
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let mut password_bytes = password.peppered(pepper);

        // Argon2 uses constant-time comparison internally
        let matched = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        matched
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
