//! Subsystem trait.
//!
//! RULE: Every subsystem implements SimSubsystem.
//! The engine calls process() on each registered subsystem
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{error::SimResult, state::GameState};
use std::time::Duration;

/// The contract every subsystem must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `state`: the live state store, exclusively borrowed for this call
    /// - `delta`: the measured wall-clock time since the previous tick
    ///
    /// Effects must scale with `delta`; it is not guaranteed to equal the
    /// nominal tick period. An `Err` is logged and recorded by the engine,
    /// never fatal.
    fn process(&mut self, state: &mut GameState, delta: Duration) -> SimResult<()>;
}
