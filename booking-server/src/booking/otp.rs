//! One-Time Password store
//!
//! Gates the final booking submission. The store is injected through
//! [`OtpStore`] so a shared backend can replace the in-process map in
//! multi-instance deployments; the default [`MemoryOtpStore`] keeps
//! codes in a `DashMap` keyed by user ID.
//!
//! State machine per key:
//! - issue: generates a 6-digit code with an absolute expiry,
//!   overwriting any unconsumed code for the key
//! - verify: code matches and expiry not elapsed → entry deleted
//!   (single use), returns true; otherwise false, no state change
//! - clear: drops the entry unconditionally

use std::time::Duration;

use dashmap::DashMap;
use rand::Rng;

/// Default code lifetime
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(10 * 60);

pub trait OtpStore: Send + Sync {
    /// Issue a fresh code for the key, replacing any existing one.
    fn issue(&self, key: i64) -> String;

    /// Single-use verification: consumes the entry on success.
    fn verify(&self, key: i64, code: &str) -> bool;

    /// Non-consuming check, for the wizard's intermediate OTP step.
    /// The entry stays in place so the final submission can consume it.
    fn peek(&self, key: i64, code: &str) -> bool;

    /// Drop any entry for the key.
    fn clear(&self, key: i64);

    /// Remove expired entries. Called by the periodic sweep task.
    fn sweep(&self);
}

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: i64,
}

/// Process-local OTP store
///
/// Codes do not survive a restart, and in a horizontally scaled
/// deployment issuance and verification must land on the same
/// instance — acceptable for the single-process target.
#[derive(Debug)]
pub struct MemoryOtpStore {
    entries: DashMap<i64, OtpEntry>,
    ttl_millis: i64,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_OTP_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_millis: ttl.as_millis() as i64,
        }
    }

    fn generate_code() -> String {
        let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{n:06}")
    }
}

impl Default for MemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpStore for MemoryOtpStore {
    fn issue(&self, key: i64) -> String {
        let code = Self::generate_code();
        let expires_at = shared::util::now_millis() + self.ttl_millis;
        self.entries.insert(
            key,
            OtpEntry {
                code: code.clone(),
                expires_at,
            },
        );
        code
    }

    fn verify(&self, key: i64, code: &str) -> bool {
        let now = shared::util::now_millis();

        // remove_if keeps the check-and-consume atomic per key
        let removed = self
            .entries
            .remove_if(&key, |_, entry| entry.code == code && now < entry.expires_at);
        removed.is_some()
    }

    fn peek(&self, key: i64, code: &str) -> bool {
        let now = shared::util::now_millis();
        self.entries
            .get(&key)
            .map(|entry| entry.code == code && now < entry.expires_at)
            .unwrap_or(false)
    }

    fn clear(&self, key: i64) {
        self.entries.remove(&key);
    }

    fn sweep(&self) {
        let now = shared::util::now_millis();
        self.entries.retain(|_, entry| now < entry.expires_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_digits() {
        let store = MemoryOtpStore::new();
        let code = store.issue(1);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn verify_is_single_use() {
        let store = MemoryOtpStore::new();
        let code = store.issue(1);

        assert!(store.verify(1, &code));
        // Same code again: the entry was consumed
        assert!(!store.verify(1, &code));
    }

    #[test]
    fn wrong_code_leaves_entry_intact() {
        let store = MemoryOtpStore::new();
        let code = store.issue(1);

        assert!(!store.verify(1, "000000x"));
        assert!(store.verify(1, &code));
    }

    #[test]
    fn reissue_overwrites_previous_code() {
        let store = MemoryOtpStore::new();
        let first = store.issue(1);
        let second = store.issue(1);

        if first != second {
            assert!(!store.verify(1, &first));
        }
        assert!(store.verify(1, &second));
    }

    #[test]
    fn expired_code_is_rejected() {
        let store = MemoryOtpStore::with_ttl(Duration::ZERO);
        let code = store.issue(1);
        assert!(!store.verify(1, &code));
    }

    #[test]
    fn keys_are_independent() {
        let store = MemoryOtpStore::new();
        let a = store.issue(1);
        let b = store.issue(2);

        assert!(store.verify(1, &a));
        assert!(store.verify(2, &b));
        assert!(!store.verify(1, &a));
        assert!(!store.verify(2, &b));
    }

    #[test]
    fn sweep_drops_only_expired_entries() {
        let live = MemoryOtpStore::new();
        let code = live.issue(1);
        live.sweep();
        assert!(live.verify(1, &code));

        let dead = MemoryOtpStore::with_ttl(Duration::ZERO);
        dead.issue(1);
        dead.sweep();
        assert!(dead.entries.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let store = MemoryOtpStore::new();
        let code = store.issue(1);

        assert!(store.peek(1, &code));
        assert!(store.peek(1, &code));
        assert!(!store.peek(1, "999999x"));
        assert!(store.verify(1, &code));
        assert!(!store.peek(1, &code));
    }

    #[test]
    fn clear_removes_the_entry() {
        let store = MemoryOtpStore::new();
        let code = store.issue(1);
        store.clear(1);
        assert!(!store.verify(1, &code));
    }
}
