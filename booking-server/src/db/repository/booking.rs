//! Booking Repository
//!
//! The slot uniqueness rule — one booking per (event_date, venue,
//! shift) — is enforced by the `idx_booking_slot` UNIQUE index, not by
//! application code. `insert` maps the constraint violation to
//! [`RepoError::Duplicate`] so concurrent writers get the same error
//! the pre-check would have produced.

use super::{RepoError, RepoResult, is_unique_violation};
use shared::models::{Booking, BookingStatus, MenuSelection};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, user_id, event_id, venue_id, shift_id, package_id, event_date, guest_count, selected_menus, base_fare, extra_charges, total_fare, customer_phone, status, created_at, updated_at";

/// Fully validated booking row, ready for insert
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub shift_id: i64,
    pub package_id: i64,
    pub event_date: String,
    pub guest_count: i64,
    pub selected_menus: Vec<MenuSelection>,
    pub base_fare: f64,
    pub extra_charges: f64,
    pub total_fare: f64,
    pub customer_phone: String,
}

#[derive(sqlx::FromRow)]
struct BookingRecord {
    id: i64,
    user_id: i64,
    event_id: i64,
    venue_id: i64,
    shift_id: i64,
    package_id: i64,
    event_date: String,
    guest_count: i64,
    selected_menus: String,
    base_fare: f64,
    extra_charges: f64,
    total_fare: f64,
    customer_phone: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl BookingRecord {
    fn into_booking(self) -> RepoResult<Booking> {
        let selected_menus: Vec<MenuSelection> = serde_json::from_str(&self.selected_menus)
            .map_err(|e| {
                RepoError::Database(format!(
                    "Corrupt selected_menus for booking {}: {e}",
                    self.id
                ))
            })?;
        let status = BookingStatus::parse(&self.status).ok_or_else(|| {
            RepoError::Database(format!(
                "Unknown status '{}' for booking {}",
                self.status, self.id
            ))
        })?;
        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            event_id: self.event_id,
            venue_id: self.venue_id,
            shift_id: self.shift_id,
            package_id: self.package_id,
            event_date: self.event_date,
            guest_count: self.guest_count,
            selected_menus,
            base_fare: self.base_fare,
            extra_charges: self.extra_charges,
            total_fare: self.total_fare,
            customer_phone: self.customer_phone,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let record = sqlx::query_as::<_, BookingRecord>(&format!(
        "SELECT {COLUMNS} FROM booking WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    record.map(BookingRecord::into_booking).transpose()
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<Booking>> {
    let records = sqlx::query_as::<_, BookingRecord>(&format!(
        "SELECT {COLUMNS} FROM booking ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    records.into_iter().map(BookingRecord::into_booking).collect()
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Booking>> {
    let records = sqlx::query_as::<_, BookingRecord>(&format!(
        "SELECT {COLUMNS} FROM booking WHERE user_id = ? ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    records.into_iter().map(BookingRecord::into_booking).collect()
}

/// True when a booking already holds the exact (date, venue, shift) slot.
pub async fn slot_taken(
    pool: &SqlitePool,
    event_date: &str,
    venue_id: i64,
    shift_id: i64,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM booking WHERE event_date = ? AND venue_id = ? AND shift_id = ?",
    )
    .bind(event_date)
    .bind(venue_id)
    .bind(shift_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Number of bookings on a date, across all venues and shifts.
pub async fn count_on_date(pool: &SqlitePool, event_date: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM booking WHERE event_date = ?")
        .bind(event_date)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a booking with status `pending`.
///
/// A UNIQUE violation on the slot index becomes `Duplicate`; any other
/// constraint or I/O failure stays a `Database` error. Single
/// statement, so there is no partial write to roll back.
pub async fn insert(pool: &SqlitePool, data: NewBooking) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let selected_menus = serde_json::to_string(&data.selected_menus)
        .map_err(|e| RepoError::Database(format!("Failed to encode selections: {e}")))?;

    let result = sqlx::query(
        "INSERT INTO booking (id, user_id, event_id, venue_id, shift_id, package_id, event_date, guest_count, selected_menus, base_fare, extra_charges, total_fare, customer_phone, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)",
    )
    .bind(id)
    .bind(data.user_id)
    .bind(data.event_id)
    .bind(data.venue_id)
    .bind(data.shift_id)
    .bind(data.package_id)
    .bind(&data.event_date)
    .bind(data.guest_count)
    .bind(selected_menus)
    .bind(data.base_fare)
    .bind(data.extra_charges)
    .bind(data.total_fare)
    .bind(&data.customer_phone)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(RepoError::Duplicate(format!(
                "Slot already booked: {} venue {} shift {}",
                data.event_date, data.venue_id, data.shift_id
            )));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: BookingStatus,
) -> RepoResult<Booking> {
    let now = shared::util::now_millis();

    let rows = sqlx::query("UPDATE booking SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM booking WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool with just the booking table and its slot index.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE booking (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                event_id INTEGER NOT NULL,
                venue_id INTEGER NOT NULL,
                shift_id INTEGER NOT NULL,
                package_id INTEGER NOT NULL,
                event_date TEXT NOT NULL,
                guest_count INTEGER NOT NULL,
                selected_menus TEXT NOT NULL DEFAULT '[]',
                base_fare REAL NOT NULL,
                extra_charges REAL NOT NULL,
                total_fare REAL NOT NULL,
                customer_phone TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE UNIQUE INDEX idx_booking_slot ON booking(event_date, venue_id, shift_id)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn sample(date: &str, venue_id: i64, shift_id: i64) -> NewBooking {
        NewBooking {
            user_id: 1,
            event_id: 2,
            venue_id,
            shift_id,
            package_id: 3,
            event_date: date.to_string(),
            guest_count: 50,
            selected_menus: vec![MenuSelection {
                menu_id: 9,
                items: vec![100, 101],
            }],
            base_fare: 50_000.0,
            extra_charges: 0.0,
            total_fare: 50_000.0,
            customer_phone: "+351912345678".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_returns_pending_booking() {
        let pool = test_pool().await;

        let booking = insert(&pool, sample("2026-09-01", 10, 20)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.event_date, "2026-09-01");
        assert_eq!(booking.selected_menus.len(), 1);
        assert_eq!(booking.selected_menus[0].items, vec![100, 101]);
    }

    #[tokio::test]
    async fn second_insert_for_same_slot_is_duplicate() {
        let pool = test_pool().await;

        insert(&pool, sample("2026-09-01", 10, 20)).await.unwrap();
        let err = insert(&pool, sample("2026-09-01", 10, 20))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Duplicate(_)));
        assert_eq!(count_on_date(&pool, "2026-09-01").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_date_different_venue_or_shift_is_allowed() {
        let pool = test_pool().await;

        insert(&pool, sample("2026-09-01", 10, 20)).await.unwrap();
        insert(&pool, sample("2026-09-01", 11, 20)).await.unwrap();
        insert(&pool, sample("2026-09-01", 10, 21)).await.unwrap();

        assert_eq!(count_on_date(&pool, "2026-09-01").await.unwrap(), 3);
        assert!(slot_taken(&pool, "2026-09-01", 10, 20).await.unwrap());
        assert!(!slot_taken(&pool, "2026-09-02", 10, 20).await.unwrap());
    }

    #[tokio::test]
    async fn status_updates_and_deletes() {
        let pool = test_pool().await;

        let booking = insert(&pool, sample("2026-09-01", 10, 20)).await.unwrap();
        let updated = update_status(&pool, booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);

        assert!(delete(&pool, booking.id).await.unwrap());
        assert!(find_by_id(&pool, booking.id).await.unwrap().is_none());
    }
}
