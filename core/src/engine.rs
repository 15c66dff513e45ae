//! The simulation engine — fixed-cadence tick scheduler.
//!
//! EXECUTION ORDER (fixed at construction, never reordered):
//!   1. Production subsystem
//!   2. Input subsystem
//!   3. Timer subsystem
//!
//! RULES:
//!   - Subsystems execute in registration order, once per tick.
//!   - Every subsystem receives the same state and the same measured delta.
//!   - A failing subsystem is logged and recorded; the rest of the tick
//!     and all future ticks still run.
//!   - A tick always runs to completion; stop/pause only gate future ticks.

use crate::{
    clock::TickClock,
    error::SimError,
    state::GameState,
    subsystem::SimSubsystem,
    types::Tick,
};
use std::time::{Duration, Instant};

/// Outcome of one executed tick.
#[derive(Debug)]
pub struct TickReport {
    pub tick:     Tick,
    pub delta:    Duration,
    /// One `SubsystemFailed` per subsystem that reported an error.
    pub failures: Vec<SimError>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct SimEngine {
    pub clock:  TickClock,
    subsystems: Vec<Box<dyn SimSubsystem>>,
}

impl SimEngine {
    pub fn new(period: Duration) -> Self {
        Self {
            clock:      TickClock::new(period, Instant::now()),
            subsystems: Vec::new(),
        }
    }

    /// Register a subsystem. Call in the documented execution order,
    /// before the first tick.
    pub fn register(&mut self, subsystem: Box<dyn SimSubsystem>) {
        log::info!("Registering subsystem '{}'", subsystem.name());
        self.subsystems.push(subsystem);
    }

    pub fn subsystem_names(&self) -> Vec<&'static str> {
        self.subsystems.iter().map(|s| s.name()).collect()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.clock.start(now);
        log::info!("Engine started at tick {}", self.clock.current_tick);
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        log::info!("Engine stopped at tick {}", self.clock.current_tick);
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        log::info!("Engine paused at tick {}", self.clock.current_tick);
    }

    pub fn is_running(&self) -> bool {
        self.clock.running
    }

    /// Run a tick if one period has elapsed. Cheap no-op otherwise.
    pub fn update(&mut self, state: &mut GameState) -> Option<TickReport> {
        self.update_at(state, Instant::now())
    }

    /// [`update`](Self::update) against an explicit timestamp.
    pub fn update_at(&mut self, state: &mut GameState, now: Instant) -> Option<TickReport> {
        let delta = self.clock.advance(now)?;
        Some(self.tick(state, delta))
    }

    /// Advance one tick with the given delta, bypassing the clock gate.
    fn tick(&mut self, state: &mut GameState, delta: Duration) -> TickReport {
        let tick = self.clock.current_tick;
        log::debug!("tick={tick} start delta={delta:?}");

        let mut failures = Vec::new();
        for subsystem in &mut self.subsystems {
            let name = subsystem.name();
            match subsystem.process(state, delta) {
                Ok(()) => log::debug!("tick={tick} {name} ok"),
                Err(e) => {
                    log::warn!("tick={tick} subsystem '{name}' failed: {e}");
                    failures.push(SimError::SubsystemFailed {
                        subsystem: name,
                        source:    Box::new(e),
                    });
                }
            }
        }

        log::debug!("tick={tick} complete failures={}", failures.len());
        TickReport { tick, delta, failures }
    }
}
