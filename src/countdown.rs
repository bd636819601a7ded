use std::time::{Duration, Instant};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// What a tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// The next second has not elapsed yet
    Waiting,
    /// A new value should be displayed
    Show(i64),
    /// The countdown went below zero
    Expired,
}

/// Pre-test countdown showing N, N-1, ..., 0.
///
/// Each step is a one-shot deadline re-armed one second after the previous
/// one. A late tick steps once; if it is late by several seconds the following
/// ticks catch up one value at a time, so no value is ever skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    remaining: i64,
    next_tick_at: Instant,
}

impl Countdown {
    pub fn new(secs: i64, now: Instant) -> Self {
        Self {
            remaining: secs,
            next_tick_at: now + ONE_SECOND,
        }
    }

    /// Value currently on screen
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn on_tick(&mut self, now: Instant) -> CountdownStep {
        if self.remaining < 0 {
            return CountdownStep::Expired;
        }
        if now < self.next_tick_at {
            return CountdownStep::Waiting;
        }

        self.remaining -= 1;
        self.next_tick_at += ONE_SECOND;

        if self.remaining < 0 {
            CountdownStep::Expired
        } else {
            CountdownStep::Show(self.remaining)
        }
    }
}
