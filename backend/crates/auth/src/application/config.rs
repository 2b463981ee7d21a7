//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Bearer token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (3 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config with the given signing secret and default lifetimes
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Attach an application-wide pepper
    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_three_hours() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.token_ttl, Duration::from_secs(10_800));
        assert_eq!(config.token_ttl_secs(), 10_800);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new("top-secret").with_pepper("pepper");
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("top-secret"));
        assert!(debug_output.contains("[REDACTED]"));
        assert_eq!(config.pepper(), Some(b"pepper".as_slice()));
    }
}
