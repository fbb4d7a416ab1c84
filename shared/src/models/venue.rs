//! Venue Model

use serde::{Deserialize, Serialize};

/// Venue entity (宴会场地)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Venue {
    pub id: i64,
    pub name: String,
    /// Maximum number of guests, always > 0
    pub capacity: i64,
    /// Relative path under the upload directory, empty if none
    #[serde(default)]
    pub image: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create venue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCreate {
    pub name: String,
    pub capacity: i64,
    pub image: Option<String>,
}

/// Update venue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}
