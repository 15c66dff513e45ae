//! The state store — the single mutable aggregate every subsystem works on.
//!
//! RULE: Subsystems receive `&mut GameState` for the duration of their
//! `process()` call and never keep a copy of any container past it.
//! The presentation layer only ever sees a cloned snapshot.

use crate::{
    timer::Timer,
    types::{BuildingName, ResourceName},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A persistent production source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name:            BuildingName,
    #[serde(default)]
    pub count:           u32,
    /// Amount per second added to the linked resource.
    pub production_rate: f64,
    /// Current price. Informational only; nothing in the core buys buildings.
    #[serde(default)]
    pub cost:            f64,
}

impl Building {
    pub fn new(name: impl Into<BuildingName>, production_rate: f64) -> Self {
        Self {
            name: name.into(),
            count: 0,
            production_rate,
            cost: 0.0,
        }
    }
}

/// Resources, buildings and active timers.
///
/// `Clone` is a deep copy: every container owns its data, so a cloned
/// snapshot never aliases the live state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub resources:     HashMap<ResourceName, f64>,
    pub buildings:     HashMap<BuildingName, Building>,
    /// Creation order, compacted on removal.
    pub active_timers: Vec<Timer>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Resources ──────────────────────────────────────────────

    /// Current amount of a resource; unknown resources read as zero.
    pub fn resource(&self, name: &str) -> f64 {
        self.resources.get(name).copied().unwrap_or(0.0)
    }

    /// Add `amount` (may be negative) to a resource, creating it at zero
    /// on first reference. Returns the new amount.
    pub fn add_resource(&mut self, name: &str, amount: f64) -> f64 {
        let slot = self.resources.entry(name.to_string()).or_insert(0.0);
        *slot += amount;
        *slot
    }

    // ── Buildings ──────────────────────────────────────────────

    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings.get(name)
    }

    /// Insert or replace a building, keyed by its name.
    pub fn insert_building(&mut self, building: Building) {
        self.buildings.insert(building.name.clone(), building);
    }

    // ── Timers ─────────────────────────────────────────────────

    pub fn push_timer(&mut self, timer: Timer) {
        self.active_timers.push(timer);
    }

    /// True iff any active timer id starts with `prefix`.
    pub fn has_active_timer_with_prefix(&self, prefix: &str) -> bool {
        self.active_timers.iter().any(|t| t.id.starts_with(prefix))
    }

    /// First active timer (by position) whose id starts with `prefix`.
    pub fn find_timer(&self, prefix: &str) -> Option<&Timer> {
        self.active_timers.iter().find(|t| t.id.starts_with(prefix))
    }

    pub fn timer_count_with_prefix(&self, prefix: &str) -> usize {
        self.active_timers
            .iter()
            .filter(|t| t.id.starts_with(prefix))
            .count()
    }
}
