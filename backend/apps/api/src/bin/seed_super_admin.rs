//! Bootstrap the first super admin
//!
//! `add-admin` is itself gated to super admins, so the very first account has
//! to come from here. Safe to rerun: an existing username or email is left
//! untouched.

use anyhow::{Context, bail};
use api::config::DatabaseConfig;
use auth::application::credentials::hash_password;
use auth::domain::{NewUser, UserRepository, UserRole};
use auth::PgUserRepository;
use platform::password::ClearTextPassword;
use platform::validation;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_super_admin=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database = DatabaseConfig::from_env()?;
    let username = env_value("SUPER_ADMIN_USERNAME")?;
    let email = env_value("SUPER_ADMIN_EMAIL")?;
    let password = env_value("SUPER_ADMIN_PASSWORD")?;
    let pepper = std::env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|p| !p.is_empty())
        .map(String::into_bytes);

    if !validation::is_valid_email(&email) {
        bail!("SUPER_ADMIN_EMAIL is not a valid email address");
    }
    let password = ClearTextPassword::new(password)
        .map_err(|e| anyhow::anyhow!("SUPER_ADMIN_PASSWORD rejected: {e}"))?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let repo = PgUserRepository::new(pool);

    if repo
        .exists_by_username_or_email(&username, &email, None)
        .await?
    {
        tracing::info!(username = %username, "Super admin already present, nothing to do");
        return Ok(());
    }

    let password_hash = hash_password(password, pepper).await?;
    let user_id = repo
        .create(&NewUser {
            username,
            email,
            password_hash,
            role: UserRole::SuperAdmin,
        })
        .await?;

    tracing::info!(user_id = %user_id, "Super admin created");

    Ok(())
}

fn env_value(key: &str) -> anyhow::Result<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{key} must be set in environment"))
}
