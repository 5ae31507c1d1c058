//! Time sources and the cancellable spawn timer
//!
//! The spawn cadence runs on wall-clock time, independent of how many frames
//! were drawn. The simulation never sleeps or owns a thread: the timer is
//! polled, and a cancelled timer never reports another fire.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source
pub trait Clock {
    /// Time elapsed since some fixed origin
    fn now(&self) -> Duration;
}

/// Real wall-clock time
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to a session.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Advance by a frame step in seconds; non-finite or negative steps are ignored
    pub fn advance_secs(&self, secs: f32) {
        if secs.is_finite() && secs > 0.0 {
            self.advance(Duration::from_secs_f32(secs));
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Fires every `interval` until cancelled
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    interval: Duration,
    /// `None` while cancelled
    next_fire: Option<Duration>,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer; the first fire is one interval after `now`.
    /// Re-arming an active timer restarts its phase.
    pub fn start(&mut self, now: Duration, interval: Duration) {
        let interval = interval.max(Duration::from_millis(1));
        self.interval = interval;
        self.next_fire = Some(now + interval);
    }

    /// Stop firing. Returns whether the timer was active.
    pub fn cancel(&mut self) -> bool {
        self.next_fire.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.next_fire.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of fires that came due at or before `now` since the last poll
    pub fn fire_count(&mut self, now: Duration) -> u32 {
        let Some(mut next) = self.next_fire else {
            return 0;
        };
        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += self.interval;
        }
        self.next_fire = Some(next);
        fired
    }
}
