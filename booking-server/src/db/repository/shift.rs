//! Shift Repository

use super::{RepoError, RepoResult};
use shared::models::{Shift, ShiftCreate, ShiftUpdate};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shift>> {
    let shift = sqlx::query_as::<_, Shift>(
        "SELECT id, name, is_active, created_at, updated_at FROM shift WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(shift)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(
        "SELECT id, name, is_active, created_at, updated_at FROM shift ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(shifts)
}

pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(
        "SELECT id, name, is_active, created_at, updated_at FROM shift WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(shifts)
}

pub async fn create(pool: &SqlitePool, data: ShiftCreate) -> RepoResult<Shift> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    sqlx::query("INSERT INTO shift (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shift".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ShiftUpdate) -> RepoResult<Shift> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE shift SET name = COALESCE(?1, name), is_active = COALESCE(?2, is_active), updated_at = ?3 WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shift {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM shift WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
