//! A deterministic clock for tests and replays.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::traits::Clock;

/// A clock that starts at a fixed instant and advances by `tick` after every read.
///
/// With a tick of 100ms, a timing step started and stopped back to back
/// measures exactly 0.1s.
#[derive(Debug)]
pub struct TickingClock {
    current: Mutex<DateTime<Utc>>,
    tick: Duration,
}

impl TickingClock {
    pub fn new(start: DateTime<Utc>, tick: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            tick,
        }
    }

    /// The instant the next read will return, without advancing.
    pub fn peek(&self) -> DateTime<Utc> {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *current;
        *current = now + self.tick;
        now
    }
}
