use super::display::Handles;
use super::field::StateField;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_MAX_VALUE: f64 = 10.0;
pub const DEFAULT_MIN_VALUE: f64 = 0.0;
pub const DEFAULT_STEP: f64 = 1.0;
pub const DEFAULT_VALUE: f64 = 0.0;

/// Validated slider state owned by the model.
///
/// Invariants, upheld by every model operation:
/// - `max_value > min_value`, `step > 0`
/// - `min_value <= value <= max_value`, `value` on the step grid
/// - `value <= second_value <= max_value` when present, also on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderState {
    pub max_value: f64,
    pub min_value: f64,
    pub step: f64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_value: Option<f64>,
    #[serde(default)]
    pub locked_values: BTreeSet<StateField>,
}

impl SliderState {
    pub fn grid(&self) -> Grid {
        Grid::new(self.min_value, self.max_value, self.step)
    }

    /// Range mode: two handles.
    pub fn is_range(&self) -> bool {
        self.second_value.is_some()
    }

    pub fn is_locked(&self, field: StateField) -> bool {
        self.locked_values.contains(&field)
    }

    pub fn handles(&self) -> Handles<f64> {
        match self.second_value {
            Some(second) => Handles::Pair(self.value, second),
            None => Handles::Single(self.value),
        }
    }

    /// Fields whose numeric value differs from `other`.
    pub fn changed_fields(&self, other: &SliderState) -> Vec<StateField> {
        let mut changed = Vec::new();
        if self.max_value != other.max_value {
            changed.push(StateField::MaxValue);
        }
        if self.min_value != other.min_value {
            changed.push(StateField::MinValue);
        }
        if self.step != other.step {
            changed.push(StateField::Step);
        }
        if self.value != other.value {
            changed.push(StateField::Value);
        }
        if self.second_value != other.second_value {
            changed.push(StateField::SecondValue);
        }
        changed
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            min_value: DEFAULT_MIN_VALUE,
            step: DEFAULT_STEP,
            value: DEFAULT_VALUE,
            second_value: None,
            locked_values: BTreeSet::new(),
        }
    }
}
