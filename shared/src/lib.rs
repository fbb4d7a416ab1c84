//! Shared types for the venue booking platform
//!
//! Domain models and small utilities used by booking-server and any
//! API clients. DB row types derive `sqlx::FromRow` behind the `db`
//! feature so frontend builds stay free of database dependencies.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
