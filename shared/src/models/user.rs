//! User Model

use serde::{Deserialize, Serialize};

/// User entity
///
/// `password_hash` and the token columns never leave the server; API
/// responses use [`UserPublic`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub verification_token: Option<String>,
    pub verification_expires_at: Option<i64>,
    pub reset_token: Option<String>,
    pub reset_expires_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// User shape safe to return over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub created_at: i64,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            email_verified: u.email_verified,
            created_at: u.created_at,
        }
    }
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Login payload (user and admin surfaces share the shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response — token is also set as an HTTP-only cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// Admin-created account payload
///
/// Accounts created from the admin panel skip the verification email
/// and land already verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Self-service profile update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Password reset request (step 1: email the token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset (step 2: consume the token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}
