//! Built-in command handlers.

use crate::{
    command::InputToken,
    config::{ManualClickConfig, ManualCodeConfig, SimConfig},
    error::SimResult,
    input::{InputHandler, InputSubsystem},
    state::GameState,
    timer::{Timer, TimerEffect},
    types::MANUAL_CODE_PREFIX,
};
use std::time::Duration;

/// Register every built-in handler on `input`.
pub fn register_default_handlers(input: &mut InputSubsystem, config: &SimConfig) {
    input.register_handler(InputToken::MANUAL_CODE, manual_code(config.manual_code.clone()));
    input.register_handler(InputToken::MANUAL_CLICK, manual_click(config.manual_click.clone()));
}

/// Start a coding timer unless one is already running.
pub fn manual_code(config: ManualCodeConfig) -> InputHandler {
    Box::new(move |state: &mut GameState, _delta: Duration| -> SimResult<()> {
        if let Some(active) = state.find_timer(MANUAL_CODE_PREFIX) {
            log::info!("Coding already active ({}), ignoring", active.id);
            return Ok(());
        }
        let timer = Timer::new(
            MANUAL_CODE_PREFIX,
            config.duration(),
            TimerEffect::resource_delta(config.resource.clone(), config.amount),
        )?;
        log::info!("Started coding: {} ({:.1}s)", timer.id, config.duration_secs);
        state.push_timer(timer);
        Ok(())
    })
}

/// Add one click's worth of a resource immediately.
pub fn manual_click(config: ManualClickConfig) -> InputHandler {
    Box::new(move |state: &mut GameState, _delta: Duration| -> SimResult<()> {
        let total = state.add_resource(&config.resource, config.amount);
        log::debug!("manual click: {} = {total}", config.resource);
        Ok(())
    })
}
