//! Event Type Model

use serde::{Deserialize, Serialize};

/// Event type entity (wedding, birthday, conference, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EventType {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create event type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeCreate {
    pub name: String,
}

/// Update event type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
