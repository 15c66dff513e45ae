//! Scheduler tests — tick gating, measured delta, fixed order,
//! failure isolation and lifecycle.

use idle_core::{
    engine::SimEngine,
    error::{SimError, SimResult},
    state::GameState,
    subsystem::SimSubsystem,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Records its name (and the delta it saw) every time it runs.
struct Probe {
    name: &'static str,
    log:  Arc<Mutex<Vec<(&'static str, Duration)>>>,
    fail: bool,
}

impl SimSubsystem for Probe {
    fn name(&self) -> &'static str { self.name }

    fn process(&mut self, state: &mut GameState, delta: Duration) -> SimResult<()> {
        self.log.lock().unwrap().push((self.name, delta));
        state.add_resource(self.name, 1.0);
        if self.fail {
            return Err(SimError::HandlerFailed {
                token:  self.name.to_string(),
                reason: "probe failure".into(),
            });
        }
        Ok(())
    }
}

fn build(fail_first: bool) -> (SimEngine, Arc<Mutex<Vec<(&'static str, Duration)>>>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut engine = SimEngine::new(Duration::from_secs(1));
    for (i, name) in ["first", "second", "third"].into_iter().enumerate() {
        engine.register(Box::new(Probe {
            name,
            log: log.clone(),
            fail: fail_first && i == 0,
        }));
    }
    (engine, log)
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn update_is_noop_until_started() {
    let (mut engine, log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();

    assert!(engine.update_at(&mut state, t0 + secs(10.0)).is_none());
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(state, GameState::new());
}

#[test]
fn subsystems_run_in_registration_order_with_same_delta() {
    let (mut engine, log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();
    engine.start_at(t0);

    let report = engine.update_at(&mut state, t0 + secs(1.0)).expect("tick due");
    assert!(report.is_clean());
    assert_eq!(report.tick, 1);

    let log = log.lock().unwrap();
    let names: Vec<_> = log.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert!(log.iter().all(|(_, d)| *d == secs(1.0)));
    assert_eq!(engine.subsystem_names(), vec!["first", "second", "third"]);
}

#[test]
fn second_update_within_period_does_nothing() {
    let (mut engine, log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();
    engine.start_at(t0);

    assert!(engine.update_at(&mut state, t0 + secs(0.5)).is_none());
    assert!(engine.update_at(&mut state, t0 + secs(1.0)).is_some());
    let after_first = state.clone();

    assert!(engine.update_at(&mut state, t0 + secs(1.9)).is_none());
    assert_eq!(state, after_first, "no mutation before a full period elapses");
    assert_eq!(log.lock().unwrap().len(), 3);
    assert_eq!(engine.clock.current_tick, 1);
}

#[test]
fn late_update_carries_full_measured_delta() {
    let (mut engine, _log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();
    engine.start_at(t0);

    let report = engine.update_at(&mut state, t0 + secs(3.25)).expect("tick due");
    assert_eq!(report.delta, secs(3.25));

    // The next tick measures from the late tick, not from the nominal grid.
    assert!(engine.update_at(&mut state, t0 + secs(4.0)).is_none());
    let report = engine.update_at(&mut state, t0 + secs(4.25)).expect("tick due");
    assert_eq!(report.delta, secs(1.0));
}

#[test]
fn failing_subsystem_does_not_abort_tick_or_future_ticks() {
    let (mut engine, log) = build(true);
    let mut state = GameState::new();
    let t0 = Instant::now();
    engine.start_at(t0);

    let report = engine.update_at(&mut state, t0 + secs(1.0)).expect("tick due");
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        SimError::SubsystemFailed { subsystem, .. } => assert_eq!(*subsystem, "first"),
        other => panic!("unexpected failure: {other:?}"),
    }
    assert_eq!(state.resource("second"), 1.0);
    assert_eq!(state.resource("third"), 1.0);

    let report = engine.update_at(&mut state, t0 + secs(2.0)).expect("tick due");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(state.resource("third"), 2.0);
    assert_eq!(log.lock().unwrap().len(), 6);
}

#[test]
fn stop_and_pause_gate_future_ticks() {
    let (mut engine, _log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();

    engine.start_at(t0);
    engine.pause();
    assert!(!engine.is_running());
    assert!(engine.update_at(&mut state, t0 + secs(5.0)).is_none());

    engine.start_at(t0 + secs(5.0));
    engine.stop();
    assert!(engine.update_at(&mut state, t0 + secs(9.0)).is_none());
    assert_eq!(engine.clock.current_tick, 0);
}

#[test]
fn restart_does_not_credit_time_spent_stopped() {
    let (mut engine, _log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();

    engine.start_at(t0);
    engine.pause();
    engine.start_at(t0 + secs(10.0));

    assert!(engine.update_at(&mut state, t0 + secs(10.5)).is_none());
    let report = engine.update_at(&mut state, t0 + secs(11.0)).expect("tick due");
    assert_eq!(report.delta, secs(1.0));
}

#[test]
fn start_is_idempotent_while_running() {
    let (mut engine, _log) = build(false);
    let mut state = GameState::new();
    let t0 = Instant::now();

    engine.start_at(t0);
    engine.start_at(t0 + secs(0.9));

    let report = engine.update_at(&mut state, t0 + secs(1.0)).expect("anchor kept at t0");
    assert_eq!(report.delta, secs(1.0));
}
