//! Admin Model
//!
//! Parallel entity to [`super::User`] with the same reset-token shape
//! but a distinct login surface and no email-verification flow.

use serde::{Deserialize, Serialize};

/// Admin entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub reset_token: Option<String>,
    pub reset_expires_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Admin shape safe to return over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPublic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

impl From<Admin> for AdminPublic {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            created_at: a.created_at,
        }
    }
}

/// Admin login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: AdminPublic,
}
