//! Booking Model (预订)

use serde::{Deserialize, Serialize};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Items selected from one menu, referenced by stable item ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSelection {
    pub menu_id: i64,
    /// Ordered: the first `free_limit` entries are free, the rest billed
    pub items: Vec<i64>,
}

/// Booking record — one venue/shift/date slot held by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub shift_id: i64,
    pub package_id: i64,
    /// Event date, `YYYY-MM-DD`
    pub event_date: String,
    pub guest_count: i64,
    pub selected_menus: Vec<MenuSelection>,
    pub base_fare: f64,
    pub extra_charges: f64,
    pub total_fare: f64,
    /// Normalized international form, e.g. `+351912345678`
    pub customer_phone: String,
    pub status: BookingStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create booking payload — the final wizard step
///
/// Fares are NOT accepted from the client; the server recomputes them
/// from current catalog data at write time. `otp_code` gates the write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub event_id: i64,
    pub venue_id: i64,
    pub shift_id: i64,
    pub package_id: i64,
    pub event_date: String,
    pub guest_count: i64,
    #[serde(default)]
    pub selected_menus: Vec<MenuSelection>,
    pub customer_phone: String,
    pub otp_code: String,
}

/// Admin status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// Fare quote request (wizard step, pre-OTP)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareRequest {
    pub package_id: i64,
    pub guest_count: i64,
    #[serde(default)]
    pub selected_menus: Vec<MenuSelection>,
}

/// Fare quote — display hint only, recomputed at write time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    pub base_fare: f64,
    pub extra_charges: f64,
    pub total_fare: f64,
}
