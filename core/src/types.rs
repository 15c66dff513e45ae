//! Shared primitive types used across the entire simulation.

/// A simulation tick counter. One tick = one measured wall-clock interval.
pub type Tick = u64;

/// Name of a resource accumulator ("cpu", "features", ...).
pub type ResourceName = String;

/// Name of a building, also its key in the state store.
pub type BuildingName = String;

/// A timer identifier: `<prefix><unique suffix>`.
pub type TimerId = String;

/// Id prefix shared by every manual coding timer.
pub const MANUAL_CODE_PREFIX: &str = "manual_code_";
