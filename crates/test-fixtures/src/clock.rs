use std::sync::atomic::{AtomicI64, Ordering};

use minutes_core::traits::Clock;

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(start_ms),
        }
    }

    pub fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }

    pub fn set(&self, ms: i64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: i64) -> i64 {
        self.now.fetch_add(ms, Ordering::SeqCst) + ms
    }

    pub fn advance_secs(&self, secs: i64) -> i64 {
        self.advance_ms(secs * 1_000)
    }

    pub fn advance_minutes(&self, minutes: i64) -> i64 {
        self.advance_ms(minutes * 60_000)
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now()
    }
}
