use std::time::{Duration, Instant};

/// Identity of one armed countdown. A tick carrying an old id is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The id did not match the armed timer, or no timer is armed.
    Stale,
    /// Timer is armed but frozen.
    Paused,
    Ticked { remaining: u32 },
    Expired,
}

/// One-second countdown. At most one timer is armed at a time; arming
/// again or cancelling retires the previous id.
#[derive(Clone, Debug, Default)]
pub struct Countdown {
    armed: Option<TimerId>,
    generation: u64,
    remaining: u32,
    paused: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, budget_secs: u32) -> TimerId {
        self.generation += 1;
        let id = TimerId(self.generation);
        self.armed = Some(id);
        self.remaining = budget_secs;
        self.paused = false;
        id
    }

    pub fn cancel(&mut self) {
        self.armed = None;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        if self.armed.is_some() {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn tick(&mut self, id: TimerId) -> TickOutcome {
        if self.armed != Some(id) {
            return TickOutcome::Stale;
        }
        if self.paused {
            return TickOutcome::Paused;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = None;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked {
                remaining: self.remaining,
            }
        }
    }

    pub fn armed(&self) -> Option<TimerId> {
        self.armed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Turns an irregular event-loop cadence into whole one-second ticks.
#[derive(Clone, Debug)]
pub struct SecondClock {
    last: Instant,
    carry: Duration,
}

impl SecondClock {
    pub fn start(now: Instant) -> Self {
        Self {
            last: now,
            carry: Duration::ZERO,
        }
    }

    /// Whole seconds elapsed since the previous call; the remainder carries over.
    pub fn elapsed_ticks(&mut self, now: Instant) -> u32 {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        let total = self.carry + delta;
        let whole = total.as_secs();
        self.carry = total - Duration::from_secs(whole);
        u32::try_from(whole).unwrap_or(u32::MAX)
    }

    /// Drop accumulated time, e.g. after resuming from a pause.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
        self.carry = Duration::ZERO;
    }
}
