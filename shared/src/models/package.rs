//! Package Model (套餐)

use serde::{Deserialize, Serialize};

/// Package entity — a priced banquet package owning one or more menus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Package {
    pub id: i64,
    pub name: String,
    /// Per-guest base price, always >= 0
    pub base_price: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create package payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageCreate {
    pub name: String,
    pub base_price: f64,
}

/// Update package payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageUpdate {
    pub name: Option<String>,
    pub base_price: Option<f64>,
    pub is_active: Option<bool>,
}
