//! Timer subsystem — delayed, exactly-once completion effects.
//!
//! Each tick every active timer is aged by the tick's delta. A timer whose
//! remaining time reaches zero has its effect applied and is removed in the
//! same pass, so an expired timer never survives into the next tick.
//!
//! Expiry order: positions are visited from last to first, so timers that
//! expire in the same tick complete in reverse-positional order.
//! Timers created by an effect during the pass land past the snapshot
//! length taken at the start and are first aged on the next tick.

use crate::{
    error::{SimError, SimResult},
    state::GameState,
    subsystem::SimSubsystem,
    types::{ResourceName, TimerId},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// What happens when a timer completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerEffect {
    /// Add `amount` (may be negative) to a resource.
    ResourceDelta {
        resource: ResourceName,
        amount:   f64,
    },
    /// Start a follow-up timer.
    StartTimer {
        prefix:   String,
        duration: Duration,
        effect:   Box<TimerEffect>,
    },
    /// Apply several effects in order.
    Sequence { effects: Vec<TimerEffect> },
}

impl TimerEffect {
    pub fn resource_delta(resource: impl Into<ResourceName>, amount: f64) -> Self {
        Self::ResourceDelta { resource: resource.into(), amount }
    }

    /// Check every nested effect. An effect that validates cannot fail
    /// in [`apply`](Self::apply). A bad follow-up timer is reported by
    /// its prefix.
    pub fn validate(&self) -> SimResult<()> {
        match self {
            Self::ResourceDelta { .. } => Ok(()),
            Self::StartTimer { prefix, duration, effect } => {
                if duration.is_zero() {
                    return Err(SimError::InvalidTimer { id: prefix.clone() });
                }
                effect.validate()
            }
            Self::Sequence { effects } => effects.iter().try_for_each(TimerEffect::validate),
        }
    }

    /// Apply this effect to the state store. The whole effect is validated
    /// first; on error nothing has been applied.
    pub fn apply(&self, state: &mut GameState) -> SimResult<()> {
        self.validate()?;
        self.apply_validated(state)
    }

    fn apply_validated(&self, state: &mut GameState) -> SimResult<()> {
        match self {
            Self::ResourceDelta { resource, amount } => {
                let total = state.add_resource(resource, *amount);
                log::info!("resource '{resource}' {amount:+} -> {total}");
            }
            Self::StartTimer { prefix, duration, effect } => {
                let timer = Timer::new(prefix, *duration, (**effect).clone())?;
                log::info!("follow-up timer {} started ({duration:?})", timer.id);
                state.push_timer(timer);
            }
            Self::Sequence { effects } => {
                for effect in effects {
                    effect.apply_validated(state)?;
                }
            }
        }
        Ok(())
    }
}

/// A one-shot countdown bound to a completion effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub id:             TimerId,
    pub remaining_time: Duration,
    /// Fixed at creation, always > 0.
    pub original_time:  Duration,
    pub on_complete:    TimerEffect,
}

impl Timer {
    /// Create a timer with id `<prefix><uuid>`.
    ///
    /// Rejects a zero duration, here or in any follow-up timer nested
    /// in `on_complete`.
    pub fn new(prefix: &str, duration: Duration, on_complete: TimerEffect) -> SimResult<Self> {
        let id = format!("{prefix}{}", Uuid::new_v4().simple());
        if duration.is_zero() {
            return Err(SimError::InvalidTimer { id });
        }
        on_complete.validate()?;
        Ok(Self {
            id,
            remaining_time: duration,
            original_time:  duration,
            on_complete,
        })
    }

    /// Fraction of the countdown already elapsed, in [0, 1].
    pub fn progress(&self) -> f64 {
        let elapsed = self.original_time.saturating_sub(self.remaining_time);
        (elapsed.as_secs_f64() / self.original_time.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_time.is_zero()
    }
}

#[derive(Debug, Default)]
pub struct TimerSubsystem;

impl TimerSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl SimSubsystem for TimerSubsystem {
    fn name(&self) -> &'static str { "timer" }

    fn process(&mut self, state: &mut GameState, delta: Duration) -> SimResult<()> {
        let mut failures = Vec::new();

        // Only positions that existed before the pass are visited.
        let snapshot_len = state.active_timers.len();
        for i in (0..snapshot_len).rev() {
            let timer = &mut state.active_timers[i];
            timer.remaining_time = timer.remaining_time.saturating_sub(delta);
            log::debug!("timer {} remaining={:?}", timer.id, timer.remaining_time);

            if !timer.is_expired() {
                continue;
            }

            let id = timer.id.clone();
            let effect = timer.on_complete.clone();
            log::info!("timer {id} completed");

            if let Err(e) = effect.apply(state) {
                log::warn!("completion effect of timer {id} failed: {e}");
                failures.push(SimError::TimerEffectFailed { id, source: Box::new(e) });
            }
            // Removal only shifts positions above i, which were already visited.
            state.active_timers.remove(i);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SimError::TimerEffects { failures })
        }
    }
}
