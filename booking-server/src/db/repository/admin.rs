//! Admin Repository
//!
//! Same reset-token shape as the user table, distinct login surface.

use super::{RepoError, RepoResult, is_unique_violation};
use shared::models::Admin;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, name, email, password_hash, reset_token, reset_expires_at, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admin WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(admin)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Admin>> {
    let admin =
        sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admin WHERE email = ?"))
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(admin)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<Admin> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let result = sqlx::query(
        "INSERT INTO admin (id, name, email, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(RepoError::Duplicate(format!(
                "Admin email already registered: {email}"
            )));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin".into()))
}

pub async fn set_reset_token(
    pool: &SqlitePool,
    email: &str,
    token: &str,
    expires_at: i64,
) -> RepoResult<Option<Admin>> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE admin SET reset_token = ?1, reset_expires_at = ?2, updated_at = ?3 WHERE email = ?4",
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

pub async fn reset_password(
    pool: &SqlitePool,
    token: &str,
    password_hash: &str,
) -> RepoResult<Admin> {
    let now = shared::util::now_millis();

    let id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM admin WHERE reset_token = ? AND reset_expires_at > ?",
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    let id = id
        .ok_or_else(|| RepoError::NotFound("Reset link is invalid or has expired".into()))?;

    sqlx::query(
        "UPDATE admin SET password_hash = ?1, reset_token = NULL, reset_expires_at = NULL, updated_at = ?2 WHERE id = ?3",
    )
    .bind(password_hash)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Admin {id} not found")))
}
