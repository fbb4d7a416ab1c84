//! Package Repository

use super::{RepoError, RepoResult};
use shared::models::{Package, PackageCreate, PackageUpdate};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Package>> {
    let package = sqlx::query_as::<_, Package>(
        "SELECT id, name, base_price, is_active, created_at, updated_at FROM package WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(package)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Package>> {
    let packages = sqlx::query_as::<_, Package>(
        "SELECT id, name, base_price, is_active, created_at, updated_at FROM package ORDER BY base_price",
    )
    .fetch_all(pool)
    .await?;
    Ok(packages)
}

pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Package>> {
    let packages = sqlx::query_as::<_, Package>(
        "SELECT id, name, base_price, is_active, created_at, updated_at FROM package WHERE is_active = 1 ORDER BY base_price",
    )
    .fetch_all(pool)
    .await?;
    Ok(packages)
}

pub async fn create(pool: &SqlitePool, data: PackageCreate) -> RepoResult<Package> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    sqlx::query(
        "INSERT INTO package (id, name, base_price, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.base_price)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create package".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PackageUpdate) -> RepoResult<Package> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE package SET name = COALESCE(?1, name), base_price = COALESCE(?2, base_price), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.base_price)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Package {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Package {id} not found")))
}

/// Delete a package; owned menus go with it (ON DELETE CASCADE).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM package WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
