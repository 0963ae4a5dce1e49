//! Model integration tests: construction fallbacks, transactional updates,
//! locking and observer notification.

use rangeslider_core::domain::{LockTarget, ModelOptions, SliderState, StateField};
use rangeslider_core::model::{Model, ModelObserver};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ── Helpers ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Counter {
    calls: Cell<usize>,
}

impl ModelObserver for Counter {
    fn update(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

/// Records the state seen during each notification.
struct StateSpy {
    model: Rc<Model>,
    seen: RefCell<Vec<SliderState>>,
}

impl ModelObserver for StateSpy {
    fn update(&self) {
        self.seen.borrow_mut().push(self.model.get_state());
    }
}

fn model_at(max: f64, min: f64, step: f64, value: f64) -> Model {
    Model::new(
        &ModelOptions::new()
            .with_bounds(min, max)
            .with_step(step)
            .with_value(value),
    )
}

fn counted(model: &Model) -> Rc<Counter> {
    let counter = Rc::new(Counter::default());
    model.add_observer(counter.clone());
    counter
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn test_construction_defaults() {
    let state = Model::new(&ModelOptions::default()).get_state();
    assert_eq!(state.max_value, 10.0);
    assert_eq!(state.min_value, 0.0);
    assert_eq!(state.step, 1.0);
    assert_eq!(state.value, 0.0);
    assert_eq!(state.second_value, None);
    assert!(state.locked_values.is_empty());
}

#[test]
fn test_construction_all_invalid_gives_defaults() {
    let options: ModelOptions = serde_json::from_str(
        r#"{"maxValue": -10, "minValue": 5, "step": 2, "secondValue": -30, "lockedValues": ["foo"]}"#,
    )
    .unwrap();
    let state = Model::new(&options).get_state();
    // the valid step is discarded along with the inverted bounds
    assert_eq!(state, SliderState::default());
    assert_eq!(state.step, 1.0);
}

#[test]
fn test_construction_out_of_range_value_falls_back_alone() {
    let state = Model::new(
        &ModelOptions::new()
            .with_bounds(50.0, 100.0)
            .with_step(5.0)
            .with_value(500.0),
    )
    .get_state();
    assert_eq!(state.min_value, 50.0);
    assert_eq!(state.step, 5.0);
    assert_eq!(state.value, 50.0);
}

#[test]
fn test_construction_valid_options_kept() {
    let options: ModelOptions = serde_json::from_str(
        r#"{"maxValue": 100, "minValue": -100, "step": 5, "value": -20, "secondValue": 35,
            "lockedValues": ["value", "step"]}"#,
    )
    .unwrap();
    let state = Model::new(&options).get_state();
    assert_eq!(state.max_value, 100.0);
    assert_eq!(state.min_value, -100.0);
    assert_eq!(state.step, 5.0);
    assert_eq!(state.value, -20.0);
    assert_eq!(state.second_value, Some(35.0));
    assert!(state.is_locked(StateField::Value));
    assert!(state.is_locked(StateField::Step));
    assert!(!state.is_locked(StateField::MaxValue));
}

#[test]
fn test_construction_lock_all() {
    let options: ModelOptions = serde_json::from_str(r#"{"lockedValues": "all"}"#).unwrap();
    let state = Model::new(&options).get_state();
    assert_eq!(state.locked_values.len(), StateField::ALL.len());
}

#[test]
fn test_construction_snaps_value() {
    let state = model_at(10.0, 0.0, 3.0, 5.0).get_state();
    assert_eq!(state.value, 6.0);
}

// ── Transactions ─────────────────────────────────────────────────────

#[test]
fn test_notify_once_for_multi_field_update() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let a = counted(&model);
    let b = counted(&model);

    let changed = model.update_state(
        &ModelOptions::new()
            .with_bounds(0.0, 100.0)
            .with_step(25.0)
            .with_value(40.0),
    );

    assert!(changed);
    assert_eq!(a.calls.get(), 1);
    assert_eq!(b.calls.get(), 1);
    let state = model.get_state();
    assert_eq!(state.max_value, 100.0);
    assert_eq!(state.step, 25.0);
    assert_eq!(state.value, 50.0);
}

#[test]
fn test_no_op_update_is_silent() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = counted(&model);

    let changed = model.update_state(
        &ModelOptions::new()
            .with_bounds(0.0, 10.0)
            .with_step(1.0)
            .with_value(3.0),
    );

    assert!(!changed);
    assert_eq!(counter.calls.get(), 0);
}

#[test]
fn test_empty_update_is_silent() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = counted(&model);
    assert!(!model.update_state(&ModelOptions::new()));
    assert_eq!(counter.calls.get(), 0);
}

#[test]
fn test_inverted_bounds_rejected() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = counted(&model);
    let before = model.get_state();

    model.update_state(&ModelOptions::new().with_bounds(10.0, 0.0));

    assert_eq!(model.get_state(), before);
    assert_eq!(counter.calls.get(), 0);
}

#[test]
fn test_unrepresentable_range_rejected() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = counted(&model);
    let before = model.get_state();

    model.update_state(&ModelOptions::new().with_bounds(-1e308, 1e308));

    assert_eq!(model.get_state(), before);
    assert_eq!(counter.calls.get(), 0);
}

#[test]
fn test_tiny_step_snaps_to_grid() {
    let model = model_at(1e-9, 0.0, 1e-11, 0.0);
    assert!(model.update_state(&ModelOptions::new().with_value(3e-11)));
    assert_eq!(model.get_state().value, 3e-11);

    model.update_state(&ModelOptions::new().with_value(7.6e-11));
    assert_eq!(model.get_state().value, 8e-11);
}

#[test]
fn test_invalid_step_does_not_block_value() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    model.update_state(&ModelOptions::new().with_step(-1.0).with_value(7.0));
    let state = model.get_state();
    assert_eq!(state.step, 1.0);
    assert_eq!(state.value, 7.0);
}

#[test]
fn test_non_finite_value_rejected() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    model.update_state(&ModelOptions::new().with_value(f64::NAN));
    assert_eq!(model.get_state().value, 3.0);
}

#[test]
fn test_value_clamped_and_snapped() {
    let model = model_at(10.0, 0.0, 2.0, 0.0);
    model.update_state(&ModelOptions::new().with_value(55.0));
    assert_eq!(model.get_state().value, 10.0);
    model.update_state(&ModelOptions::new().with_value(-3.0));
    assert_eq!(model.get_state().value, 0.0);
    model.update_state(&ModelOptions::new().with_value(5.0));
    assert_eq!(model.get_state().value, 6.0);
    model.update_state(&ModelOptions::new().with_value(4.9));
    assert_eq!(model.get_state().value, 4.0);
}

#[test]
fn test_fractional_step_has_no_drift() {
    let model = model_at(1.0, 0.0, 0.1, 0.0);
    model.update_state(&ModelOptions::new().with_value(0.3));
    assert_eq!(model.get_state().value, 0.3);
    model.update_state(&ModelOptions::new().with_value(0.71));
    assert_eq!(model.get_state().value, 0.7);
}

#[test]
fn test_range_mode_enter_and_leave() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);

    model.update_state(&ModelOptions::new().with_second_value(8.0));
    let state = model.get_state();
    assert!(state.is_range());
    assert_eq!(state.second_value, Some(8.0));

    model.update_state(&ModelOptions::new().without_second_value());
    assert!(!model.get_state().is_range());
}

#[test]
fn test_second_value_never_below_value() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    model.update_state(&ModelOptions::new().with_second_value(5.0));
    model.update_state(&ModelOptions::new().with_value(9.0));
    let state = model.get_state();
    assert_eq!(state.value, 9.0);
    assert_eq!(state.second_value, Some(9.0));
}

#[test]
fn test_shrinking_bounds_pull_handles_in() {
    let model = model_at(100.0, 0.0, 10.0, 50.0);
    model.update_state(&ModelOptions::new().with_second_value(90.0));
    model.update_state(&ModelOptions::new().with_bounds(60.0, 80.0));
    let state = model.get_state();
    assert_eq!(state.value, 60.0);
    assert_eq!(state.second_value, Some(80.0));
}

#[test]
fn test_update_sequence() {
    let model = Model::new(&ModelOptions::default());

    model.update_state(&ModelOptions::new().with_max(100.0).with_step(5.0));
    model.update_state(&ModelOptions::new().with_value(37.0));
    assert_eq!(model.get_state().value, 35.0);

    model.update_state(&ModelOptions::new().with_min(40.0));
    assert_eq!(model.get_state().value, 40.0);

    model.update_state(&ModelOptions::new().with_second_value(120.0));
    assert_eq!(model.get_state().second_value, Some(100.0));

    model.update_state(&ModelOptions::new().with_step(0.0));
    assert_eq!(model.get_state().step, 5.0);
}

// ── Locking ──────────────────────────────────────────────────────────

#[test]
fn test_locking_round_trip() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);

    model.lock_state([StateField::MaxValue]);
    model.update_state(&ModelOptions::new().with_max(999.0));
    assert_eq!(model.get_state().max_value, 10.0);

    model.unlock_state([StateField::MaxValue]);
    model.update_state(&ModelOptions::new().with_max(999.0));
    assert_eq!(model.get_state().max_value, 999.0);
}

#[test]
fn test_lock_all_and_unlock_all() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    model.lock_state(LockTarget::All);
    assert!(!model.update_state(&ModelOptions::new().with_value(7.0).with_step(2.0)));

    model.unlock_state(LockTarget::All);
    assert!(model.update_state(&ModelOptions::new().with_value(7.0)));
}

#[test]
fn test_lock_changes_do_not_notify() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = counted(&model);
    model.lock_state(StateField::BOUNDS);
    model.unlock_state(StateField::BOUNDS);
    assert_eq!(counter.calls.get(), 0);
}

#[test]
fn test_update_ignores_locked_values_key() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    model.update_state(&ModelOptions::new().with_value(5.0).with_locked(LockTarget::All));
    let state = model.get_state();
    assert_eq!(state.value, 5.0);
    assert!(state.locked_values.is_empty());
}

#[test]
fn test_locked_field_valid_sibling_still_applies() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    model.lock_state([StateField::Step]);
    model.update_state(&ModelOptions::new().with_step(2.0).with_value(6.0));
    let state = model.get_state();
    assert_eq!(state.step, 1.0);
    assert_eq!(state.value, 6.0);
}

// ── Observers ────────────────────────────────────────────────────────

#[test]
fn test_observer_reads_committed_state() {
    let model = Rc::new(model_at(10.0, 0.0, 1.0, 3.0));
    let spy = Rc::new(StateSpy {
        model: model.clone(),
        seen: RefCell::new(Vec::new()),
    });
    model.add_observer(spy.clone());

    model.update_state(&ModelOptions::new().with_value(4.0));
    model.update_state(&ModelOptions::new().with_value(9.0));

    let seen = spy.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].value, 4.0);
    assert_eq!(seen[1].value, 9.0);
}

#[test]
fn test_duplicate_observer_notified_once() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = Rc::new(Counter::default());
    model.add_observer(counter.clone());
    model.add_observer(counter.clone());
    assert_eq!(model.observer_count(), 1);

    model.update_state(&ModelOptions::new().with_value(4.0));
    assert_eq!(counter.calls.get(), 1);
}

#[test]
fn test_removed_observer_not_notified() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let counter = Rc::new(Counter::default());
    let handle: Rc<dyn ModelObserver> = counter.clone();
    model.add_observer(handle.clone());
    model.remove_observer(&handle);

    model.update_state(&ModelOptions::new().with_value(4.0));
    assert_eq!(counter.calls.get(), 0);
}

#[test]
fn test_state_snapshot_is_independent() {
    let model = model_at(10.0, 0.0, 1.0, 3.0);
    let mut snapshot = model.get_state();
    snapshot.value = 9.0;
    snapshot.locked_values.insert(StateField::Value);
    let state = model.get_state();
    assert_eq!(state.value, 3.0);
    assert!(state.locked_values.is_empty());
}
