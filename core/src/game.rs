//! The game facade — engine + state store behind one lifecycle-controlled
//! surface for the presentation layer.
//!
//! Reads go through [`Game::state`], which returns a deep copy.
//! Writes go through [`Game::queue_input`].

use crate::{
    command::InputToken,
    config::SimConfig,
    engine::{SimEngine, TickReport},
    error::SimResult,
    handlers,
    input::{InputHandler, InputQueue, InputSubsystem},
    production::ProductionSubsystem,
    snapshot::StateSnapshot,
    state::{Building, GameState},
    timer::TimerSubsystem,
    types::Tick,
};
use std::time::Instant;

pub struct Game {
    engine: SimEngine,
    state:  GameState,
    input:  InputQueue,
}

impl Game {
    /// Wire the engine in its fixed order with the built-in handlers.
    /// Fails with `InvalidConfig` if `config` does not validate.
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        Self::with_handlers(config, Vec::new())
    }

    /// Like [`new`](Self::new), plus extra handlers registered after the
    /// built-in ones (a handler for a built-in token replaces it).
    pub fn with_handlers(
        config: &SimConfig,
        extra: Vec<(InputToken, InputHandler)>,
    ) -> SimResult<Self> {
        config.validate()?;

        let mut input = InputSubsystem::new();
        handlers::register_default_handlers(&mut input, config);
        for (token, handler) in extra {
            input.register_handler(token, handler);
        }
        let queue = input.queue();

        let mut engine = SimEngine::new(config.tick_period());
        engine.register(Box::new(ProductionSubsystem::new(config.production.clone())));
        engine.register(Box::new(input));
        engine.register(Box::new(TimerSubsystem::new()));

        let mut state = GameState::new();
        for building in &config.buildings {
            state.insert_building(building.clone());
        }

        log::info!(
            "Created game: period={:?} buildings={}",
            config.tick_period(),
            state.buildings.len()
        );
        Ok(Self { engine, state, input: queue })
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn start_at(&mut self, now: Instant) {
        self.engine.start_at(now);
    }

    /// Stop ticking and drop any input still queued.
    pub fn stop(&mut self) {
        self.engine.stop();
        let dropped = self.input.take_all();
        if !dropped.is_empty() {
            log::info!("Discarded {} queued input(s) on stop", dropped.len());
        }
    }

    /// Stop ticking; queued input is kept for the next tick after `start`.
    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Advance at most one tick. `None` if no tick was due.
    pub fn update(&mut self) -> Option<TickReport> {
        self.engine.update(&mut self.state)
    }

    pub fn update_at(&mut self, now: Instant) -> Option<TickReport> {
        self.engine.update_at(&mut self.state, now)
    }

    pub fn queue_input(&self, token: InputToken) {
        log::debug!("queue_input '{token}'");
        self.input.push(token);
    }

    pub fn pending_inputs(&self) -> usize {
        self.input.len()
    }

    /// Insert or replace a building in the live state.
    pub fn add_building(&mut self, building: Building) {
        self.state.insert_building(building);
    }

    /// Independent snapshot of resources, buildings and timers.
    pub fn state(&self) -> GameState {
        self.state.clone()
    }

    /// Display view of [`state`](Self::state) with timer progress.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from_state(self.tick_count(), self.is_running(), self.state())
    }

    pub fn tick_count(&self) -> Tick {
        self.engine.clock.current_tick
    }
}
