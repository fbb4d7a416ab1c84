//! Menu Model (菜单)
//!
//! A menu belongs to exactly one package and carries an ordered item
//! list plus a free allowance. Items have stable server-assigned IDs;
//! selection payloads reference those IDs so menu edits never shift
//! the meaning of an existing selection.

use serde::{Deserialize, Serialize};

/// One item on a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable snowflake ID, assigned by the server on create/update
    pub id: i64,
    pub name: String,
    /// Per-guest surcharge when selected beyond the free limit
    pub price: Option<f64>,
}

/// Menu entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub package_id: i64,
    pub name: String,
    /// Ordered item list
    pub items: Vec<MenuItem>,
    /// Number of items selectable without charge, >= 0
    pub free_limit: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu payload — items without an `id` get one assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    pub items: Vec<MenuItemInput>,
    #[serde(default)]
    pub free_limit: i64,
}

/// Update menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub items: Option<Vec<MenuItemInput>>,
    pub free_limit: Option<i64>,
}

/// Item as submitted by the admin panel; `id` is kept when present so
/// existing selections stay valid across edits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub id: Option<i64>,
    pub name: String,
    pub price: Option<f64>,
}
