use thiserror::Error;

/// Every failure the core can report.
///
/// None of these are fatal to the simulation: the engine logs them,
/// collects them into the tick's [`TickReport`](crate::engine::TickReport)
/// and keeps scheduling ticks.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("No handler registered for input '{token}'")]
    HandlerNotFound { token: String },

    #[error("Handler for input '{token}' failed: {reason}")]
    HandlerFailed { token: String, reason: String },

    #[error("Handler for input '{token}' failed: {source}")]
    HandlerError {
        token: String,
        #[source]
        source: Box<SimError>,
    },

    #[error("{} queued input(s) failed during drain", failures.len())]
    InputDrain { failures: Vec<SimError> },

    #[error("Subsystem '{subsystem}' failed: {source}")]
    SubsystemFailed {
        subsystem: &'static str,
        #[source]
        source: Box<SimError>,
    },

    #[error("Completion effect of timer '{id}' failed: {source}")]
    TimerEffectFailed {
        id: String,
        #[source]
        source: Box<SimError>,
    },

    #[error("{} timer completion effect(s) failed", failures.len())]
    TimerEffects { failures: Vec<SimError> },

    #[error("Invalid timer '{id}': duration must be greater than zero")]
    InvalidTimer { id: String },

    #[error("Invalid config: {0:#}")]
    InvalidConfig(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
