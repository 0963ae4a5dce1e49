//! The slider model: validated numeric range state with field locks.
//!
//! All mutation goes through [`Model::update_state`], [`Model::lock_state`]
//! and [`Model::unlock_state`]. The public surface never fails: invalid
//! fragments of an update are dropped (and traced) while valid fragments of
//! the same call still apply.
//!
//! An update is a transaction. The next state is computed from the previous
//! one in full, compared structurally, and observers are notified exactly
//! once if anything changed.

use crate::domain::options::{check_bounds, check_finite, check_step, check_within};
use crate::domain::{LockTarget, ModelOptions, OptionsError, SecondValue, SliderState, StateField};
use crate::grid::Grid;
use crate::observer::ObserverRegistry;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Receives a bare notification after each committed transaction.
/// Observers pull the new state with [`Model::get_state`].
pub trait ModelObserver {
    fn update(&self);
}

/// Single-threaded model handle.
///
/// State lives behind a `RefCell` and every borrow is released before
/// observers run, so observers may read the model from `update()`. Writing
/// to the model from inside `update()` is not supported.
pub struct Model {
    state: RefCell<SliderState>,
    observers: RefCell<ObserverRegistry<dyn ModelObserver>>,
}

impl Model {
    /// Build a model from options merged over the defaults. Never fails;
    /// invalid fields fall back (see [`initial_state`]).
    pub fn new(options: &ModelOptions) -> Self {
        let state = initial_state(options);
        debug!(
            min = state.min_value,
            max = state.max_value,
            step = state.step,
            value = state.value,
            second = ?state.second_value,
            "model created"
        );
        Self {
            state: RefCell::new(state),
            observers: RefCell::new(ObserverRegistry::new()),
        }
    }

    /// Independent snapshot of the current state.
    pub fn get_state(&self) -> SliderState {
        self.state.borrow().clone()
    }

    /// Apply a partial update as one transaction.
    ///
    /// Locked fields are ignored, as is `locked_values` (locks change only
    /// through [`Model::lock_state`] / [`Model::unlock_state`]). Returns
    /// `true` if the state changed and observers were notified.
    pub fn update_state(&self, options: &ModelOptions) -> bool {
        let previous = self.get_state();
        let next = transition(&previous, options);

        if next == previous {
            trace!("update produced no change");
            return false;
        }

        debug!(changed = ?next.changed_fields(&previous), "state updated");
        *self.state.borrow_mut() = next;
        self.notify();
        true
    }

    /// Freeze fields against [`Model::update_state`].
    pub fn lock_state(&self, target: impl Into<LockTarget>) {
        let fields = target.into().fields();
        let mut state = self.state.borrow_mut();
        state.locked_values.extend(fields.iter().copied());
        debug!(locked = ?state.locked_values, "fields locked");
    }

    /// Inverse of [`Model::lock_state`].
    pub fn unlock_state(&self, target: impl Into<LockTarget>) {
        let fields = target.into().fields();
        let mut state = self.state.borrow_mut();
        for field in &fields {
            state.locked_values.remove(field);
        }
        debug!(locked = ?state.locked_values, "fields unlocked");
    }

    /// Register an observer. Re-adding the same handle is a no-op.
    pub fn add_observer(&self, observer: Rc<dyn ModelObserver>) {
        self.observers.borrow_mut().add(observer);
    }

    pub fn remove_observer(&self, observer: &Rc<dyn ModelObserver>) {
        self.observers.borrow_mut().remove(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    fn notify(&self) {
        // snapshot first: observers read the model while being notified
        let observers = self.observers.borrow().snapshot();
        for observer in observers {
            observer.update();
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(&ModelOptions::default())
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("state", &*self.state.borrow())
            .field("observers", &self.observer_count())
            .finish()
    }
}

// ── Construction ─────────────────────────────────────────────────────

/// Validate one supplied field, falling back when it is absent or invalid.
fn merge_field(
    field: StateField,
    supplied: Option<f64>,
    fallback: f64,
    check: impl FnOnce(f64) -> Result<f64, OptionsError>,
) -> f64 {
    match supplied.map(check) {
        None => fallback,
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            trace!(%field, %err, fallback, "option rejected");
            fallback
        }
    }
}

/// Merge construction options over the defaults, field by field, in the
/// order `minValue → maxValue → step → value → secondValue → lockedValues`.
///
/// - `minValue` must be finite.
/// - `maxValue` must be finite and above the merged `minValue`. Every other
///   field is interpreted against the bounds, so when the pair is invalid
///   the whole bag is discarded and the state is the defaults.
/// - `step` must be finite and positive.
/// - `value` must lie in `[min, max]`; otherwise it starts at `min`.
/// - `secondValue` must lie in `[value, max]`; otherwise range mode is off.
/// - unknown lock names were already dropped when the target was parsed.
///
/// Accepted values are snapped to the step grid.
pub fn initial_state(options: &ModelOptions) -> SliderState {
    let defaults = SliderState::default();

    let min = merge_field(
        StateField::MinValue,
        options.min_value,
        defaults.min_value,
        |v| check_finite(StateField::MinValue, v),
    );
    let max = options.max_value.unwrap_or(defaults.max_value);
    let (min, max) = match check_bounds(min, max) {
        Ok(bounds) => bounds,
        Err(err) => {
            trace!(%err, "bounds rejected, discarding options");
            return defaults;
        }
    };

    let step = merge_field(StateField::Step, options.step, defaults.step, check_step);
    let grid = Grid::new(min, max, step);

    let value = merge_field(StateField::Value, options.value, min, |v| {
        check_within(StateField::Value, v, min, max)
    });
    let value = grid.snap(value);

    let second_value = match options.second_value {
        SecondValue::Set(v) => match check_within(StateField::SecondValue, v, value, max) {
            Ok(v) => Some(grid.snap(v)),
            Err(err) => {
                trace!(%err, "secondValue rejected, single handle");
                None
            }
        },
        SecondValue::Keep | SecondValue::Remove => None,
    };

    let locked_values = options
        .locked_values
        .as_ref()
        .map(LockTarget::fields)
        .unwrap_or_default()
        .into_iter()
        .collect();

    SliderState {
        max_value: max,
        min_value: min,
        step,
        value,
        second_value,
        locked_values,
    }
}

// ── Transactions ─────────────────────────────────────────────────────

/// Compute the state that results from applying `options` to `previous`.
///
/// 1. Unlocked supplied bounds replace the current ones; the pair is rejected
///    as a whole unless `max > min`.
/// 2. An unlocked supplied step is rejected unless finite and positive.
/// 3. `value` (supplied if unlocked and finite, else current) is clamped into
///    the new bounds and snapped to the grid, ties rounding up.
/// 4. `secondValue` likewise, with `value` as its lower bound. An explicit
///    removal leaves range mode.
///
/// Steps 3 and 4 run even when the handle fields are locked: a lock stops
/// input from moving a handle, not the invariants from holding after a
/// bounds change.
pub fn transition(previous: &SliderState, options: &ModelOptions) -> SliderState {
    let unlocked = |field: StateField, supplied: Option<f64>| {
        supplied.filter(|_| !previous.is_locked(field))
    };

    let candidate_min = unlocked(StateField::MinValue, options.min_value).unwrap_or(previous.min_value);
    let candidate_max = unlocked(StateField::MaxValue, options.max_value).unwrap_or(previous.max_value);
    let (min, max) = check_bounds(candidate_min, candidate_max).unwrap_or_else(|err| {
        trace!(%err, "bounds change rejected");
        (previous.min_value, previous.max_value)
    });

    let step = unlocked(StateField::Step, options.step)
        .and_then(|v| {
            check_step(v)
                .map_err(|err| trace!(%err, "step change rejected"))
                .ok()
        })
        .unwrap_or(previous.step);

    let grid = Grid::new(min, max, step);

    let value = unlocked(StateField::Value, options.value)
        .and_then(|v| {
            check_finite(StateField::Value, v)
                .map_err(|err| trace!(%err, "value change rejected"))
                .ok()
        })
        .unwrap_or(previous.value);
    let value = grid.snap(value);

    let second_value = if previous.is_locked(StateField::SecondValue) {
        previous.second_value
    } else {
        match options.second_value {
            SecondValue::Keep => previous.second_value,
            SecondValue::Remove => None,
            SecondValue::Set(v) => match check_finite(StateField::SecondValue, v) {
                Ok(v) => Some(v),
                Err(err) => {
                    trace!(%err, "secondValue change rejected");
                    previous.second_value
                }
            },
        }
    };
    let second_value = second_value.map(|second| grid.snap(second.max(value)));

    SliderState {
        max_value: max,
        min_value: min,
        step,
        value,
        second_value,
        locked_values: previous.locked_values.clone(),
    }
}
