//! Display snapshot — a serializable, presentation-friendly view of the
//! state store at one tick.
//!
//! Built from an owned copy of the state; nothing in here refers back
//! into the live simulation.

use crate::{
    state::{Building, GameState},
    timer::Timer,
    types::{ResourceName, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub id:             String,
    pub remaining_secs: f64,
    pub original_secs:  f64,
    pub progress:       f64,
}

impl From<&Timer> for TimerView {
    fn from(timer: &Timer) -> Self {
        Self {
            id:             timer.id.clone(),
            remaining_secs: timer.remaining_time.as_secs_f64(),
            original_secs:  timer.original_time.as_secs_f64(),
            progress:       timer.progress(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tick:      Tick,
    pub running:   bool,
    // Sorted so repeated snapshots serialize identically.
    pub resources: BTreeMap<ResourceName, f64>,
    pub buildings: Vec<Building>,
    pub timers:    Vec<TimerView>,
}

impl StateSnapshot {
    pub fn from_state(tick: Tick, running: bool, state: GameState) -> Self {
        let mut buildings: Vec<Building> = state.buildings.into_values().collect();
        buildings.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            tick,
            running,
            resources: state.resources.into_iter().collect(),
            buildings,
            timers: state.active_timers.iter().map(TimerView::from).collect(),
        }
    }
}
