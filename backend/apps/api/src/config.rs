//! Server Configuration
//!
//! Read once from the process environment (after `.env` is loaded) and handed
//! to the feature crates as plain values.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use catalog::{CatalogConfig, CloudinaryConfig};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Connection settings, shared with the seed binary
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            url: required(&lookup, "DATABASE_URL")?,
            max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }
}

/// Everything `main` needs to build the router
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub cloudinary: CloudinaryConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database = DatabaseConfig::from_lookup(&lookup)?;

        let mut auth = AuthConfig::new(required(&lookup, "JWT_SECRET")?);
        if let Some(pepper) = optional(&lookup, "PASSWORD_PEPPER") {
            auth = auth.with_pepper(pepper);
        }

        let mut cloudinary = CloudinaryConfig::new(
            required(&lookup, "CLOUDINARY_CLOUD_NAME")?,
            required(&lookup, "CLOUDINARY_API_KEY")?,
            required(&lookup, "CLOUDINARY_API_SECRET")?,
        )
        .with_timeout(Duration::from_secs(parsed(
            &lookup,
            "IMAGE_UPLOAD_TIMEOUT_SECS",
            DEFAULT_UPLOAD_TIMEOUT_SECS,
        )?));
        if let Some(base_url) = optional(&lookup, "CLOUDINARY_BASE_URL") {
            cloudinary = cloudinary.with_base_url(base_url);
        }

        let frontend_origins = optional(&lookup, "FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            port: parsed(&lookup, "PORT", DEFAULT_PORT)?,
            database,
            frontend_origins,
            auth,
            catalog: CatalogConfig::default(),
            cloudinary,
        })
    }
}

/// Values set to an empty string count as unset
fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    match optional(lookup, key) {
        Some(value) => Ok(value),
        None => bail!("{key} must be set in environment"),
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/catalog"),
        ("JWT_SECRET", "secret"),
        ("CLOUDINARY_CLOUD_NAME", "demo"),
        ("CLOUDINARY_API_KEY", "key"),
        ("CLOUDINARY_API_SECRET", "shh"),
    ];

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(env(MINIMAL)).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.auth.pepper().is_none());
        assert_eq!(config.cloudinary.base_url, catalog::infra::cloudinary::DEFAULT_BASE_URL);
        assert_eq!(config.cloudinary.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend([
            ("PORT", "8080"),
            ("PASSWORD_PEPPER", "pepper"),
            ("FRONTEND_ORIGINS", "https://admin.example.com, ,https://shop.example.com"),
            ("CLOUDINARY_BASE_URL", "http://127.0.0.1:9000"),
            ("IMAGE_UPLOAD_TIMEOUT_SECS", "5"),
        ]);
        let config = ServerConfig::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.pepper(), Some(b"pepper".as_slice()));
        assert_eq!(
            config.frontend_origins,
            vec!["https://admin.example.com", "https://shop.example.com"]
        );
        assert_eq!(config.cloudinary.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.cloudinary.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let pairs: Vec<_> = MINIMAL
            .iter()
            .copied()
            .filter(|(k, _)| *k != "JWT_SECRET")
            .collect();
        let err = ServerConfig::from_lookup(env(&pairs)).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("PORT", "http"));
        assert!(ServerConfig::from_lookup(env(&pairs)).is_err());
    }
}
