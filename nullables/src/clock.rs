//! Nullable clock — deterministic time for testing.

use dao_types::Timestamp;
use std::cell::Cell;

const SECS_PER_DAY: u64 = 86_400;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(Timestamp::new(initial_secs)),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add_secs(secs));
    }

    pub fn advance_days(&self, days: u64) {
        self.advance(days.saturating_mul(SECS_PER_DAY));
    }

    /// Jump to `at`. Moving backwards is allowed.
    pub fn set(&self, at: Timestamp) {
        self.current.set(at);
    }
}
