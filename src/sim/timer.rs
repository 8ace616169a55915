//! Periodic task driven by elapsed milliseconds
//!
//! Stands in for `setInterval`: the host feeds elapsed time, the task reports
//! when it is due. Restarting discards any partial progress, so the next
//! firing is a full interval away.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodicTask {
    interval_ms: u32,
    elapsed_ms: u32,
    active: bool,
}

impl PeriodicTask {
    pub fn start(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.elapsed_ms = 0;
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed_ms = 0;
    }

    /// Cancel the outstanding firing and start over with a new period
    pub fn reschedule(&mut self, interval_ms: u32) {
        self.cancel();
        self.start(interval_ms);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Milliseconds until the next firing (None when cancelled)
    pub fn until_due(&self) -> Option<u32> {
        self.active.then(|| self.interval_ms - self.elapsed_ms)
    }

    /// Let `ms` pass; returns true if the task fired.
    ///
    /// Callers step at most `until_due()` at a time, so one call fires at
    /// most once.
    pub fn elapse(&mut self, ms: u32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed_ms += ms;
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}
