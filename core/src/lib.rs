//! Incremental simulation core: resources, buildings, delayed timers and
//! player commands advanced by a fixed-cadence tick scheduler.
//!
//! The presentation layer talks to [`game::Game`] only.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod handlers;
pub mod input;
pub mod production;
pub mod snapshot;
pub mod state;
pub mod subsystem;
pub mod timer;
pub mod types;
