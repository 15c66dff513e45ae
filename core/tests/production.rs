//! Production subsystem tests — linear, delta-scaled accrual.

use idle_core::{
    config::ProductionLink,
    production::ProductionSubsystem,
    state::{Building, GameState},
    subsystem::SimSubsystem,
};
use std::time::Duration;

const EPS: f64 = 1e-6;

fn state_with_compiler(rate: f64) -> GameState {
    let mut state = GameState::new();
    state.insert_building(Building::new("compiler", rate));
    state
}

fn run(state: &mut GameState, deltas: &[f64]) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut production = ProductionSubsystem::default();
    for d in deltas {
        production.process(state, Duration::from_secs_f64(*d)).unwrap();
    }
}

#[test]
fn accrual_is_independent_of_how_time_is_split() {
    let mut one_step = state_with_compiler(2.0);
    let mut many_steps = state_with_compiler(2.0);

    run(&mut one_step, &[3.0]);
    run(&mut many_steps, &[0.3, 1.2, 0.25, 1.25]);

    assert!((one_step.resource("cpu") - 6.0).abs() < EPS);
    assert!((many_steps.resource("cpu") - 6.0).abs() < EPS);
}

#[test]
fn adds_to_prior_amount_and_keeps_fractions() {
    let mut state = state_with_compiler(0.5);
    state.add_resource("cpu", 10.0);

    run(&mut state, &[0.1]);
    assert!((state.resource("cpu") - 10.05).abs() < EPS);
}

#[test]
fn missing_building_contributes_nothing() {
    let mut state = GameState::new();
    run(&mut state, &[1.0]);

    assert_eq!(state.resource("cpu"), 0.0);
    assert_eq!(state.resource("memory"), 0.0);
}

#[test]
fn each_default_link_feeds_its_own_resource() {
    let mut state = state_with_compiler(1.0);
    state.insert_building(Building::new("memory", 4.0));

    run(&mut state, &[2.0]);
    assert!((state.resource("cpu") - 2.0).abs() < EPS);
    assert!((state.resource("memory") - 8.0).abs() < EPS);
}

#[test]
fn custom_links_replace_the_defaults() {
    let mut production = ProductionSubsystem::new(vec![ProductionLink::new("server", "users")]);
    let mut state = state_with_compiler(1.0);
    state.insert_building(Building::new("server", 3.0));

    production.process(&mut state, Duration::from_secs(2)).unwrap();

    assert!((state.resource("users") - 6.0).abs() < EPS);
    assert_eq!(state.resource("cpu"), 0.0);
    assert_eq!(production.links().len(), 1);
}

#[test]
fn negative_rates_are_applied_as_is() {
    let mut state = state_with_compiler(-1.5);
    run(&mut state, &[2.0]);
    assert!((state.resource("cpu") + 3.0).abs() < EPS);
}
