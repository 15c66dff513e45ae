//! Input subsystem — buffers command tokens between ticks.
//!
//! The host queues tokens whenever it likes through an [`InputQueue`]
//! handle. Once per tick the subsystem drains the whole queue in FIFO
//! order and dispatches each token to its registered handler.
//!
//! Drain policy:
//!   - Unregistered tokens are logged and skipped.
//!   - A failing handler does not stop the drain; every failure is
//!     collected into one `InputDrain` error for the tick. Errors other
//!     than `HandlerFailed` are wrapped in `HandlerError` with the
//!     original kept as the source.
//!   - The queue is always empty when `process()` returns.

use crate::{
    command::InputToken,
    error::{SimError, SimResult},
    state::GameState,
    subsystem::SimSubsystem,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A handler bound to one token.
pub type InputHandler = Box<dyn FnMut(&mut GameState, Duration) -> SimResult<()> + Send>;

/// Cloneable handle to the pending-token queue.
///
/// The facade keeps one clone so it can enqueue without looking the
/// input subsystem up in the engine's subsystem list.
#[derive(Clone, Default)]
pub struct InputQueue {
    pending: Arc<Mutex<Vec<InputToken>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token. Duplicates are kept as separate entries.
    pub fn push(&self, token: InputToken) {
        self.lock().push(token);
    }

    /// Remove and return every pending token in submission order.
    pub fn take_all(&self) -> Vec<InputToken> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<InputToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct InputSubsystem {
    queue:    InputQueue,
    handlers: HashMap<InputToken, InputHandler>,
}

impl InputSubsystem {
    pub fn new() -> Self {
        Self::with_queue(InputQueue::new())
    }

    pub fn with_queue(queue: InputQueue) -> Self {
        Self { queue, handlers: HashMap::new() }
    }

    /// A handle sharing this subsystem's queue.
    pub fn queue(&self) -> InputQueue {
        self.queue.clone()
    }

    pub fn queue_input(&self, token: InputToken) {
        log::debug!("queued input '{token}'");
        self.queue.push(token);
    }

    /// Bind `handler` to `token`, replacing any earlier handler.
    pub fn register_handler(&mut self, token: InputToken, handler: InputHandler) {
        if self.handlers.insert(token.clone(), handler).is_some() {
            log::info!("Replaced handler for input '{token}'");
        } else {
            log::info!("Registered handler for input '{token}'");
        }
    }

    pub fn has_handler(&self, token: &InputToken) -> bool {
        self.handlers.contains_key(token)
    }

    fn dispatch(&mut self, token: &InputToken, state: &mut GameState, delta: Duration) -> SimResult<()> {
        let handler = self
            .handlers
            .get_mut(token)
            .ok_or_else(|| SimError::HandlerNotFound { token: token.to_string() })?;
        handler(state, delta)
    }
}

impl Default for InputSubsystem {
    fn default() -> Self { Self::new() }
}

impl SimSubsystem for InputSubsystem {
    fn name(&self) -> &'static str { "input" }

    fn process(&mut self, state: &mut GameState, delta: Duration) -> SimResult<()> {
        let tokens = self.queue.take_all();
        let mut failures = Vec::new();

        for token in &tokens {
            match self.dispatch(token, state, delta) {
                Ok(()) => log::debug!("handled input '{token}'"),
                Err(e @ SimError::HandlerNotFound { .. }) => log::warn!("{e}"),
                Err(e) => {
                    log::warn!("input '{token}' failed: {e}");
                    failures.push(match e {
                        SimError::HandlerFailed { .. } => e,
                        other => SimError::HandlerError {
                            token:  token.to_string(),
                            source: Box::new(other),
                        },
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SimError::InputDrain { failures })
        }
    }
}
