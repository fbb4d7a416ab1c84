//! Booking Writer
//!
//! Final step of the wizard: authoritative validation of the
//! client-held draft, then a single insert with `status = 'pending'`.
//! Fares are recomputed here from current catalog data — whatever the
//! client showed the guest is treated as a display hint.

use shared::models::{Booking, BookingCreate};
use sqlx::SqlitePool;

use crate::booking::{fare, otp::OtpStore, phone};
use crate::db::repository::{booking, event_type, menu, package, shift, venue};
use crate::db::repository::booking::NewBooking;
use crate::utils::{AppError, AppResult, time, validation};

/// Everything the writer needs; kept narrow so tests don't have to
/// stand up a full server state.
pub struct WriterContext<'a> {
    pub pool: &'a SqlitePool,
    pub otp: &'a dyn OtpStore,
    pub default_country_code: &'a str,
}

/// Validate and persist a booking draft.
///
/// Failure order: syntactic checks, OTP gate, referenced entities,
/// capacity, slot. The slot pre-check only improves the error message;
/// the UNIQUE index on (event_date, venue_id, shift_id) is what makes
/// the guarantee hold under concurrency. No partial write on any path.
///
/// The OTP code is single-use: a draft that fails a later validation
/// needs a freshly issued code on retry.
pub async fn create_booking(
    ctx: &WriterContext<'_>,
    user_id: i64,
    payload: BookingCreate,
) -> AppResult<Booking> {
    // Syntactic validation first, so a bad date doesn't burn the code
    let date = time::parse_date(&payload.event_date)?;
    time::validate_not_past(date)?;
    let event_date = date.format("%Y-%m-%d").to_string();
    validation::validate_positive(payload.guest_count, "guest_count")?;
    let customer_phone = phone::normalize(&payload.customer_phone, ctx.default_country_code)?;

    // OTP gate
    if !ctx.otp.verify(user_id, &payload.otp_code) {
        return Err(AppError::validation("OTP code is invalid or expired"));
    }

    // Referenced entities must exist and be bookable
    let event = event_type::find_by_id(ctx.pool, payload.event_id).await?;
    let event = event
        .filter(|e| e.is_active)
        .ok_or_else(|| AppError::validation("Invalid event type reference"))?;

    let venue = venue::find_by_id(ctx.pool, payload.venue_id).await?;
    let venue = venue
        .filter(|v| v.is_active)
        .ok_or_else(|| AppError::validation("Invalid venue reference"))?;

    let shift = shift::find_by_id(ctx.pool, payload.shift_id).await?;
    let shift = shift
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::validation("Invalid shift reference"))?;

    let pkg = package::find_by_id(ctx.pool, payload.package_id).await?;
    let pkg = pkg
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::validation("Invalid package reference"))?;

    // Capacity
    if venue.capacity < payload.guest_count {
        return Err(AppError::validation(format!(
            "Venue capacity exceeded: {} holds {} guests, {} requested",
            venue.name, venue.capacity, payload.guest_count
        )));
    }

    // Authoritative fare, from the catalog as it is right now
    let menus = menu::find_by_package(ctx.pool, pkg.id).await?;
    let quote = fare::calculate_fare(&pkg, &menus, payload.guest_count, &payload.selected_menus)?;

    // Pre-check for a friendly message; the unique index is the guarantee
    if booking::slot_taken(ctx.pool, &event_date, venue.id, shift.id).await? {
        return Err(AppError::conflict(format!(
            "Slot already booked: {} at {} ({})",
            event_date, venue.name, shift.name
        )));
    }

    let created = booking::insert(
        ctx.pool,
        NewBooking {
            user_id,
            event_id: event.id,
            venue_id: venue.id,
            shift_id: shift.id,
            package_id: pkg.id,
            event_date,
            guest_count: payload.guest_count,
            selected_menus: payload.selected_menus,
            base_fare: quote.base_fare,
            extra_charges: quote.extra_charges,
            total_fare: quote.total_fare,
            customer_phone,
        },
    )
    .await?;

    tracing::info!(
        booking_id = created.id,
        user_id,
        event_date = %created.event_date,
        venue_id = created.venue_id,
        shift_id = created.shift_id,
        total_fare = created.total_fare,
        "Booking created"
    );

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::otp::MemoryOtpStore;
    use shared::models::{BookingStatus, MenuSelection};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        for ddl in [
            "CREATE TABLE venue (
                id INTEGER PRIMARY KEY, name TEXT NOT NULL, capacity INTEGER NOT NULL,
                image TEXT NOT NULL DEFAULT '', is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0, updated_at INTEGER NOT NULL DEFAULT 0
            )",
            "CREATE TABLE shift (
                id INTEGER PRIMARY KEY, name TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0, updated_at INTEGER NOT NULL DEFAULT 0
            )",
            "CREATE TABLE event_type (
                id INTEGER PRIMARY KEY, name TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0, updated_at INTEGER NOT NULL DEFAULT 0
            )",
            "CREATE TABLE package (
                id INTEGER PRIMARY KEY, name TEXT NOT NULL, base_price REAL NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0, updated_at INTEGER NOT NULL DEFAULT 0
            )",
            "CREATE TABLE menu (
                id INTEGER PRIMARY KEY, package_id INTEGER NOT NULL, name TEXT NOT NULL,
                items_json TEXT NOT NULL DEFAULT '[]', free_limit INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL DEFAULT 0, updated_at INTEGER NOT NULL DEFAULT 0
            )",
            "CREATE TABLE booking (
                id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL, event_id INTEGER NOT NULL,
                venue_id INTEGER NOT NULL, shift_id INTEGER NOT NULL, package_id INTEGER NOT NULL,
                event_date TEXT NOT NULL, guest_count INTEGER NOT NULL,
                selected_menus TEXT NOT NULL DEFAULT '[]',
                base_fare REAL NOT NULL, extra_charges REAL NOT NULL, total_fare REAL NOT NULL,
                customer_phone TEXT NOT NULL, status TEXT NOT NULL DEFAULT 'pending',
                created_at INTEGER NOT NULL DEFAULT 0, updated_at INTEGER NOT NULL DEFAULT 0
            )",
            "CREATE UNIQUE INDEX idx_booking_slot ON booking(event_date, venue_id, shift_id)",
        ] {
            sqlx::query(ddl).execute(&pool).await.unwrap();
        }

        // Catalog seed: venue 10 (cap 100), shift 20, event 30,
        // package 40 (base 1000) with menu 50 (free_limit 2, items 50/60/70)
        sqlx::query("INSERT INTO venue (id, name, capacity) VALUES (10, 'Grand Hall', 100)")
            .execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO shift (id, name) VALUES (20, 'Evening')")
            .execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO event_type (id, name) VALUES (30, 'Wedding')")
            .execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO package (id, name, base_price) VALUES (40, 'Gold', 1000.0)")
            .execute(&pool).await.unwrap();
        sqlx::query(
            "INSERT INTO menu (id, package_id, name, items_json, free_limit) VALUES (50, 40, 'Mains', ?, 2)",
        )
        .bind(
            r#"[{"id":100,"name":"Fish","price":50.0},{"id":101,"name":"Beef","price":60.0},{"id":102,"name":"Duck","price":70.0}]"#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn future_date() -> String {
        (chrono::Utc::now().date_naive() + chrono::Days::new(60))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn draft(otp_code: &str, guest_count: i64) -> BookingCreate {
        BookingCreate {
            event_id: 30,
            venue_id: 10,
            shift_id: 20,
            package_id: 40,
            event_date: future_date(),
            guest_count,
            selected_menus: vec![MenuSelection {
                menu_id: 50,
                items: vec![100, 101, 102],
            }],
            customer_phone: "912 345 678".into(),
            otp_code: otp_code.into(),
        }
    }

    #[tokio::test]
    async fn happy_path_recomputes_fare_and_writes_pending() {
        let pool = test_pool().await;
        let otp = MemoryOtpStore::new();
        let code = otp.issue(7);
        let ctx = WriterContext {
            pool: &pool,
            otp: &otp,
            default_country_code: "351",
        };

        let booking = create_booking(&ctx, 7, draft(&code, 50)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.user_id, 7);
        // Server-side fare: 1000*50 base, third item (70) past free_limit 2
        assert_eq!(booking.base_fare, 50_000.0);
        assert_eq!(booking.extra_charges, 3_500.0);
        assert_eq!(booking.total_fare, 53_500.0);
        assert_eq!(booking.customer_phone, "+351912345678");
    }

    #[tokio::test]
    async fn capacity_exceeded_writes_nothing() {
        let pool = test_pool().await;
        let otp = MemoryOtpStore::new();
        let code = otp.issue(7);
        let ctx = WriterContext {
            pool: &pool,
            otp: &otp,
            default_country_code: "351",
        };

        let err = create_booking(&ctx, 7, draft(&code, 101)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("capacity")));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM booking")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn second_booking_for_same_slot_conflicts() {
        let pool = test_pool().await;
        let otp = MemoryOtpStore::new();
        let ctx = WriterContext {
            pool: &pool,
            otp: &otp,
            default_country_code: "351",
        };

        let code = otp.issue(7);
        create_booking(&ctx, 7, draft(&code, 50)).await.unwrap();

        let code = otp.issue(8);
        let err = create_booking(&ctx, 8, draft(&code, 50)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_entity_is_named() {
        let pool = test_pool().await;
        let otp = MemoryOtpStore::new();
        let code = otp.issue(7);
        let ctx = WriterContext {
            pool: &pool,
            otp: &otp,
            default_country_code: "351",
        };

        let mut payload = draft(&code, 50);
        payload.venue_id = 999;
        let err = create_booking(&ctx, 7, payload).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("venue")));
    }

    #[tokio::test]
    async fn otp_gate_blocks_and_is_single_use() {
        let pool = test_pool().await;
        let otp = MemoryOtpStore::new();
        let ctx = WriterContext {
            pool: &pool,
            otp: &otp,
            default_country_code: "351",
        };

        // No code ever issued
        let err = create_booking(&ctx, 7, draft("123456", 50)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("OTP")));

        // A consumed code cannot book a second slot
        let code = otp.issue(7);
        create_booking(&ctx, 7, draft(&code, 50)).await.unwrap();

        let mut second = draft(&code, 50);
        second.shift_id = 999; // would fail later anyway, OTP fails first
        let err = create_booking(&ctx, 7, second).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("OTP")));
    }

    #[tokio::test]
    async fn past_dates_are_rejected_before_touching_the_otp() {
        let pool = test_pool().await;
        let otp = MemoryOtpStore::new();
        let code = otp.issue(7);
        let ctx = WriterContext {
            pool: &pool,
            otp: &otp,
            default_country_code: "351",
        };

        let mut payload = draft(&code, 50);
        payload.event_date = "2000-01-01".into();
        assert!(create_booking(&ctx, 7, payload).await.is_err());

        // The code survived the syntactic failure
        let payload = draft(&code, 50);
        assert!(create_booking(&ctx, 7, payload).await.is_ok());
    }
}
