//! Data models
//!
//! Shared between booking-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).

pub mod admin;
pub mod booking;
pub mod event_type;
pub mod menu;
pub mod package;
pub mod shift;
pub mod user;
pub mod venue;

// Re-exports
pub use admin::*;
pub use booking::*;
pub use event_type::*;
pub use menu::*;
pub use package::*;
pub use shift::*;
pub use user::*;
pub use venue::*;
