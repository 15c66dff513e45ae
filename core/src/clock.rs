//! Simulation clock — owns tick timing and the running flag.
//!
//! The clock measures real elapsed time. A tick is due once at least one
//! period has passed since the last tick, and the delta handed to the
//! subsystems is the full measured interval, not the nominal period.

use crate::types::Tick;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickClock {
    pub current_tick: Tick,
    pub period:       Duration,
    pub running:      bool,
    last_tick:        Instant,
}

impl TickClock {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            current_tick: 0,
            period,
            running: false,
            last_tick: now,
        }
    }

    /// Set running. Re-anchors the last tick when leaving the stopped
    /// state so time spent stopped or paused is never credited.
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.last_tick = now;
        }
    }

    pub fn stop(&mut self)  { self.running = false; }
    pub fn pause(&mut self) { self.running = false; }

    /// If a tick is due at `now`, advance the clock and return the
    /// measured delta. Returns `None` while stopped or before one period.
    pub fn advance(&mut self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed < self.period {
            return None;
        }
        self.last_tick = now;
        self.current_tick += 1;
        Some(elapsed)
    }
}
