//! User Repository

use super::{RepoError, RepoResult, is_unique_violation};
use shared::models::User;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, email, password_hash, phone, email_verified, verification_token, verification_expires_at, reset_token, reset_expires_at, created_at, updated_at";

/// New user row, password already hashed by the caller
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub verification_token: String,
    pub verification_expires_at: i64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Insert a new, unverified user. Duplicate email becomes `Duplicate`.
pub async fn create(pool: &SqlitePool, data: NewUser) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let result = sqlx::query(
        "INSERT INTO user (id, name, email, password_hash, phone, email_verified, verification_token, verification_expires_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 0, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.password_hash)
    .bind(&data.phone)
    .bind(&data.verification_token)
    .bind(data.verification_expires_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(RepoError::Duplicate(format!(
                "Email already registered: {}",
                data.email
            )));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Insert an already-verified user, for admin-panel account creation.
/// No verification token is stored. Duplicate email becomes `Duplicate`.
pub async fn create_verified(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
    phone: Option<&str>,
) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let result = sqlx::query(
        "INSERT INTO user (id, name, email, password_hash, phone, email_verified, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(RepoError::Duplicate(format!(
                "Email already registered: {email}"
            )));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Self-service profile update; `password_hash` arrives pre-hashed.
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    name: Option<String>,
    phone: Option<String>,
    password_hash: Option<String>,
) -> RepoResult<User> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE user SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), password_hash = COALESCE(?3, password_hash), updated_at = ?4 WHERE id = ?5",
    )
    .bind(name)
    .bind(phone)
    .bind(password_hash)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Consume a verification token: marks the email verified and clears
/// the token. Returns the user, or `NotFound` when the token is
/// unknown or past its expiry.
pub async fn verify_email(pool: &SqlitePool, token: &str) -> RepoResult<User> {
    let now = shared::util::now_millis();

    let id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM user WHERE verification_token = ? AND verification_expires_at > ?",
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    let id = id.ok_or_else(|| {
        RepoError::NotFound("Verification link is invalid or has expired".into())
    })?;

    sqlx::query(
        "UPDATE user SET email_verified = 1, verification_token = NULL, verification_expires_at = NULL, updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Store a password reset token for the given email. Returns the user
/// when one exists; the handler responds identically either way to
/// avoid account enumeration.
pub async fn set_reset_token(
    pool: &SqlitePool,
    email: &str,
    token: &str,
    expires_at: i64,
) -> RepoResult<Option<User>> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE user SET reset_token = ?1, reset_expires_at = ?2, updated_at = ?3 WHERE email = ?4",
    )
    .bind(token)
    .bind(expires_at)
    .bind(now)
    .bind(email)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_email(pool, email).await
}

/// Consume a reset token and set the new password hash.
pub async fn reset_password(
    pool: &SqlitePool,
    token: &str,
    password_hash: &str,
) -> RepoResult<User> {
    let now = shared::util::now_millis();

    let id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM user WHERE reset_token = ? AND reset_expires_at > ?",
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    let id = id
        .ok_or_else(|| RepoError::NotFound("Reset link is invalid or has expired".into()))?;

    sqlx::query(
        "UPDATE user SET password_hash = ?1, reset_token = NULL, reset_expires_at = NULL, updated_at = ?2 WHERE id = ?3",
    )
    .bind(password_hash)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                phone TEXT,
                email_verified INTEGER NOT NULL DEFAULT 0,
                verification_token TEXT,
                verification_expires_at INTEGER,
                reset_token TEXT,
                reset_expires_at INTEGER,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn admin_created_accounts_are_verified_without_a_token() {
        let pool = test_pool().await;

        let user = create_verified(&pool, "Maria", "maria@example.com", "hash", Some("+351912345678"))
            .await
            .unwrap();

        assert!(user.email_verified);
        assert!(user.verification_token.is_none());
        assert_eq!(user.phone.as_deref(), Some("+351912345678"));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_across_creation_paths() {
        let pool = test_pool().await;

        create_verified(&pool, "Maria", "maria@example.com", "hash", None)
            .await
            .unwrap();

        let err = create_verified(&pool, "Other", "maria@example.com", "hash2", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let err = create(
            &pool,
            NewUser {
                name: "Third".into(),
                email: "maria@example.com".into(),
                password_hash: "hash3".into(),
                phone: None,
                verification_token: "tok".into(),
                verification_expires_at: shared::util::now_millis() + 1000,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn profile_update_touches_only_the_given_fields() {
        let pool = test_pool().await;

        let user = create_verified(&pool, "Maria", "maria@example.com", "hash", None)
            .await
            .unwrap();

        let updated = update_profile(&pool, user.id, Some("Maria Silva".into()), None, None)
            .await
            .unwrap();

        assert_eq!(updated.name, "Maria Silva");
        assert_eq!(updated.email, "maria@example.com");
        assert_eq!(updated.password_hash, "hash");

        let err = update_profile(&pool, 999, Some("x".into()), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
