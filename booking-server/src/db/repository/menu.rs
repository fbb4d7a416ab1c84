//! Menu Repository
//!
//! Item lists live in a JSON column (`items_json`); rows are decoded
//! through a private record type so the shared [`Menu`] model stays a
//! plain serde struct.

use super::{RepoError, RepoResult};
use shared::models::{Menu, MenuCreate, MenuItem, MenuItemInput, MenuUpdate};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct MenuRecord {
    id: i64,
    package_id: i64,
    name: String,
    items_json: String,
    free_limit: i64,
    created_at: i64,
    updated_at: i64,
}

impl MenuRecord {
    fn into_menu(self) -> RepoResult<Menu> {
        let items: Vec<MenuItem> = serde_json::from_str(&self.items_json)
            .map_err(|e| RepoError::Database(format!("Corrupt items_json for menu {}: {e}", self.id)))?;
        Ok(Menu {
            id: self.id,
            package_id: self.package_id,
            name: self.name,
            items,
            free_limit: self.free_limit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Assign stable IDs to items that arrive without one.
///
/// IDs submitted by the admin panel are kept so existing selections
/// stay valid across menu edits.
fn assign_item_ids(inputs: Vec<MenuItemInput>) -> Vec<MenuItem> {
    inputs
        .into_iter()
        .map(|i| MenuItem {
            id: i.id.unwrap_or_else(shared::util::snowflake_id),
            name: i.name,
            price: i.price,
        })
        .collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Menu>> {
    let record = sqlx::query_as::<_, MenuRecord>(
        "SELECT id, package_id, name, items_json, free_limit, created_at, updated_at FROM menu WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    record.map(MenuRecord::into_menu).transpose()
}

pub async fn find_by_package(pool: &SqlitePool, package_id: i64) -> RepoResult<Vec<Menu>> {
    let records = sqlx::query_as::<_, MenuRecord>(
        "SELECT id, package_id, name, items_json, free_limit, created_at, updated_at FROM menu WHERE package_id = ? ORDER BY name",
    )
    .bind(package_id)
    .fetch_all(pool)
    .await?;
    records.into_iter().map(MenuRecord::into_menu).collect()
}

pub async fn create(pool: &SqlitePool, package_id: i64, data: MenuCreate) -> RepoResult<Menu> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let items = assign_item_ids(data.items);
    let items_json = serde_json::to_string(&items)
        .map_err(|e| RepoError::Database(format!("Failed to encode menu items: {e}")))?;

    sqlx::query(
        "INSERT INTO menu (id, package_id, name, items_json, free_limit, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(package_id)
    .bind(&data.name)
    .bind(items_json)
    .bind(data.free_limit)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuUpdate) -> RepoResult<Menu> {
    let now = shared::util::now_millis();
    let items_json = match data.items {
        Some(inputs) => Some(
            serde_json::to_string(&assign_item_ids(inputs))
                .map_err(|e| RepoError::Database(format!("Failed to encode menu items: {e}")))?,
        ),
        None => None,
    };

    let rows = sqlx::query(
        "UPDATE menu SET name = COALESCE(?1, name), items_json = COALESCE(?2, items_json), free_limit = COALESCE(?3, free_limit), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(items_json)
    .bind(data.free_limit)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_submitted_item_ids_and_assigns_missing_ones() {
        let items = assign_item_ids(vec![
            MenuItemInput {
                id: Some(42),
                name: "Soup".into(),
                price: Some(5.0),
            },
            MenuItemInput {
                id: None,
                name: "Salad".into(),
                price: None,
            },
        ]);

        assert_eq!(items[0].id, 42);
        assert!(items[1].id > 0);
        assert_ne!(items[0].id, items[1].id);
    }
}
