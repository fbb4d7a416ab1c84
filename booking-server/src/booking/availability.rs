//! Availability Checker
//!
//! Two read-only rules at different wizard steps:
//!
//! - slot rule: a (date, venue, shift) triple is free unless a booking
//!   already holds it — the same rule the writer re-checks, and the
//!   UNIQUE index ultimately enforces
//! - date rule: an early, coarse check that allows a date while fewer
//!   than `max_per_date` bookings exist on it, across all venues and
//!   shifts

use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, booking};

pub async fn slot_available(
    pool: &SqlitePool,
    event_date: &str,
    venue_id: i64,
    shift_id: i64,
) -> RepoResult<bool> {
    Ok(!booking::slot_taken(pool, event_date, venue_id, shift_id).await?)
}

pub async fn date_available(
    pool: &SqlitePool,
    event_date: &str,
    max_per_date: i64,
) -> RepoResult<bool> {
    Ok(booking::count_on_date(pool, event_date).await? < max_per_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE booking (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL DEFAULT 1,
                event_id INTEGER NOT NULL DEFAULT 1,
                venue_id INTEGER NOT NULL,
                shift_id INTEGER NOT NULL,
                package_id INTEGER NOT NULL DEFAULT 1,
                event_date TEXT NOT NULL,
                guest_count INTEGER NOT NULL DEFAULT 10,
                selected_menus TEXT NOT NULL DEFAULT '[]',
                base_fare REAL NOT NULL DEFAULT 0,
                extra_charges REAL NOT NULL DEFAULT 0,
                total_fare REAL NOT NULL DEFAULT 0,
                customer_phone TEXT NOT NULL DEFAULT '+351900000000',
                status TEXT NOT NULL DEFAULT 'pending',
                created_at INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn seed(pool: &SqlitePool, date: &str, venue_id: i64, shift_id: i64) {
        sqlx::query("INSERT INTO booking (venue_id, shift_id, event_date) VALUES (?, ?, ?)")
            .bind(venue_id)
            .bind(shift_id)
            .bind(date)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn slot_rule_matches_exact_triple_only() {
        let pool = test_pool().await;
        seed(&pool, "2026-09-01", 10, 20).await;

        assert!(!slot_available(&pool, "2026-09-01", 10, 20).await.unwrap());
        assert!(slot_available(&pool, "2026-09-01", 10, 21).await.unwrap());
        assert!(slot_available(&pool, "2026-09-01", 11, 20).await.unwrap());
        assert!(slot_available(&pool, "2026-09-02", 10, 20).await.unwrap());
    }

    #[tokio::test]
    async fn date_rule_uses_the_threshold() {
        let pool = test_pool().await;
        for venue in 0..9 {
            seed(&pool, "2026-09-01", venue, 20).await;
        }

        // 9 bookings, threshold 10: still open
        assert!(date_available(&pool, "2026-09-01", 10).await.unwrap());

        seed(&pool, "2026-09-01", 9, 20).await;

        // 10 bookings: date is full, regardless of venue/shift
        assert!(!date_available(&pool, "2026-09-01", 10).await.unwrap());
        assert!(date_available(&pool, "2026-09-02", 10).await.unwrap());
    }
}
