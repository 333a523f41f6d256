//! Clock implementations.

use crate::infrastructure::ports::ClockPort;
use chrono::{DateTime, Utc};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that advances one second per reading, for ordering tests.
#[cfg(test)]
pub struct TickingClock {
    start: DateTime<Utc>,
    ticks: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl TickingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            ticks: std::sync::atomic::AtomicI64::new(0),
        }
    }
}

#[cfg(test)]
impl ClockPort for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self
            .ticks
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.start + chrono::Duration::seconds(tick)
    }
}
