//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::db::ConstraintViolation;
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, ProfileUpdate, User, UserCredentials};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique violations on `users` to `UserTaken`
fn map_write_error(err: sqlx::Error) -> AuthError {
    match ConstraintViolation::classify(&err) {
        Some(ConstraintViolation::Unique) => {
            tracing::warn!(
                constraint = ConstraintViolation::constraint_name(&err).unwrap_or("unknown"),
                "Unique violation on users"
            );
            AuthError::UserTaken
        }
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn find_credentials(&self, identifier: &str) -> AuthResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                role,
                created_at,
                updated_at
            FROM users
            WHERE username = $1 OR email = $1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credentials()).transpose()
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        exclude: Option<UserId>,
    ) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM users
                WHERE (username = $1 OR email = $2)
                  AND ($3::INTEGER IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(exclude.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(UserId::new(id))
    }

    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                email,
                role,
                created_at,
                updated_at
            FROM users
            WHERE role = $1
            ORDER BY id
            "#,
        )
        .bind(role.code())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn delete_with_role(&self, id: UserId, role: UserRole) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
            .bind(id.value())
            .bind(role.code())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> AuthResult<bool> {
        // COALESCE keeps the stored hash when no new password was supplied
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET username = $1,
                email = $2,
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(update.password_hash.as_ref().map(HashedPassword::as_phc_string))
        .bind(id.value())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role).ok_or_else(|| {
            AuthError::Internal(format!("Unknown role code in users.role: {}", self.role))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            email: self.email,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i32,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<UserCredentials> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored hash unreadable: {e}")))?;

        let user = UserRow {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user()?;

        Ok(UserCredentials {
            user,
            password_hash,
        })
    }
}
