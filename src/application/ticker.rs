use std::time::Duration;

/// Frame-time accumulator that fires once per elapsed interval.
///
/// The host loop feeds it frame deltas. Dropping the ticker is the only
/// cancellation there is, so a dropped ticker can never fire again.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    elapsed: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Time until the next tick fires
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Add `delta` and report whether a tick is due. At most one tick fires
    /// per call and the accumulator restarts from zero; a long stall does
    /// not queue up a burst of catch-up ticks.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}
