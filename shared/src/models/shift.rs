//! Shift Model (时段)
//!
//! A shift is a named time-of-day slot (e.g. "Morning", "Evening"),
//! bookable independently per venue per date.

use serde::{Deserialize, Serialize};

/// Shift entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    pub name: String,
}

/// Update shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
