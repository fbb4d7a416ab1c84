//! Venue Repository

use super::{RepoError, RepoResult};
use shared::models::{Venue, VenueCreate, VenueUpdate};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>(
        "SELECT id, name, capacity, image, is_active, created_at, updated_at FROM venue WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(venue)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(
        "SELECT id, name, capacity, image, is_active, created_at, updated_at FROM venue ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(venues)
}

pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(
        "SELECT id, name, capacity, image, is_active, created_at, updated_at FROM venue WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(venues)
}

pub async fn create(pool: &SqlitePool, data: VenueCreate) -> RepoResult<Venue> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    sqlx::query(
        "INSERT INTO venue (id, name, capacity, image, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.image.unwrap_or_default())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create venue".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: VenueUpdate) -> RepoResult<Venue> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE venue SET name = COALESCE(?1, name), capacity = COALESCE(?2, capacity), image = COALESCE(?3, image), is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name)
    .bind(data.capacity)
    .bind(data.image)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Venue {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Venue {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
