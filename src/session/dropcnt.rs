use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::TRACE_DROP_CNT_EVERY;

// Per-core publish state of the drop accountant. Only the owning core writes
// it, from inside its critical section; the atomics exist for `Sync` and
// relaxed ordering is sufficient.
pub(crate) struct DropState {
    last_published: AtomicU32,
    countdown: AtomicU32,
}

impl DropState {
    pub const fn new() -> Self {
        Self {
            last_published: AtomicU32::new(0),
            countdown: AtomicU32::new(TRACE_DROP_CNT_EVERY),
        }
    }

    pub fn last_published(&self) -> u32 {
        self.last_published.load(Ordering::Relaxed)
    }

    pub fn countdown(&self) -> u32 {
        self.countdown.load(Ordering::Relaxed)
    }

    /// One event passed without a publish; count down towards the next
    /// periodic one, saturating at zero.
    pub fn tick(&self) {
        let c = self.countdown.load(Ordering::Relaxed);
        if c > 0 {
            self.countdown.store(c - 1, Ordering::Relaxed);
        }
    }

    /// A publish for `cnt` went through on this core.
    pub fn published(&self, cnt: u32) {
        self.last_published.store(cnt, Ordering::Relaxed);
        self.countdown.store(TRACE_DROP_CNT_EVERY, Ordering::Relaxed);
    }
}
