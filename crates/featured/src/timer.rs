//! Timer abstraction for the carousel engine.
//!
//! The engine never sleeps itself. It asks a [`Timer`] to schedule firings and
//! is handed back the [`TimerId`] when one is due. [`ManualTimer`] keeps
//! virtual time for tests; the tokio implementation lives in [`crate::driver`].

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Identity of one scheduled firing (or periodic series).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub trait Timer {
    /// Fire every `period`, the first time one period from now.
    fn every(&mut self, period: Duration) -> TimerId;

    /// Fire once after `delay`.
    fn after(&mut self, delay: Duration) -> TimerId;

    /// Stop `id`. Unknown or finished ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Duration,
    period: Option<Duration>,
}

/// Virtual-time timer. Nothing fires until [`ManualTimer::pop_due`] is asked.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_id: u64,
    scheduled: BTreeMap<TimerId, Scheduled>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward without firing anything. Never moves backward.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Earliest firing due at or before `until`, advancing the clock to it.
    /// Ties fire in scheduling order. Periodic timers are re-armed.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, scheduled) = self
            .scheduled
            .iter()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(id, s)| (s.due, **id))
            .map(|(id, s)| (*id, *s))?;

        self.now = self.now.max(scheduled.due);
        match scheduled.period {
            Some(period) => {
                if let Some(entry) = self.scheduled.get_mut(&id) {
                    entry.due = scheduled.due + period;
                }
            }
            None => {
                self.scheduled.remove(&id);
            }
        }
        Some(id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.scheduled.contains_key(&id)
    }

    /// Scheduled timers of both kinds.
    pub fn active(&self) -> usize {
        self.scheduled.len()
    }

    pub fn active_periodic(&self) -> usize {
        self.scheduled
            .values()
            .filter(|s| s.period.is_some())
            .count()
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.scheduled.insert(
            id,
            Scheduled {
                due: self.now + delay,
                period,
            },
        );
        id
    }
}

impl Timer for ManualTimer {
    fn every(&mut self, period: Duration) -> TimerId {
        // A zero period would never let virtual time advance.
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period))
    }

    fn after(&mut self, delay: Duration) -> TimerId {
        self.schedule(delay, None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.scheduled.remove(&id);
    }
}
