//! Password hashing on the blocking pool
//!
//! Argon2 is CPU-bound; running it inline would stall the async workers.

use platform::password::{ClearTextPassword, HashedPassword};
use tokio::sync::OnceCell;

use crate::error::{AuthError, AuthResult};

/// Stand-in hash for identifiers that match no user
static UNKNOWN_USER_HASH: OnceCell<HashedPassword> = OnceCell::const_new();

const UNKNOWN_USER_PASSWORD: &str = "Unknown#User0";

/// Hash `password` with the optional pepper
pub async fn hash_password(
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
) -> AuthResult<HashedPassword> {
    tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Constant-time check of `password` against `hash`
pub async fn verify_password(
    hash: HashedPassword,
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || hash.verify(&password, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))
}

/// Spend one verification on a missing user so the lookup result is not visible in latency
pub async fn verify_unknown_user(
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
) -> AuthResult<()> {
    let hash = UNKNOWN_USER_HASH
        .get_or_try_init(|| {
            hash_password(
                ClearTextPassword::for_verification(UNKNOWN_USER_PASSWORD.to_string()),
                None,
            )
        })
        .await?
        .clone();

    verify_password(hash, password, pepper).await?;
    Ok(())
}
