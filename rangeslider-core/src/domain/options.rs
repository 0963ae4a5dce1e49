//! Partial update bags for the model, with per-field validity checks.

use super::field::{LockTarget, StateField};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Why an options bag (or one field of it) is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: StateField, value: f64 },

    #[error("step must be greater than zero, got {0}")]
    NonPositiveStep(f64),

    #[error("maxValue ({max}) must be greater than minValue ({min})")]
    InvertedBounds { min: f64, max: f64 },

    #[error("range [{min}, {max}] is too wide to represent")]
    RangeOverflow { min: f64, max: f64 },

    #[error("{field} ({value}) lies outside [{low}, {high}]")]
    OutOfRange {
        field: StateField,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("secondValue ({second}) must not be below value ({value})")]
    SecondBelowValue { value: f64, second: f64 },
}

/// Requested change to the second handle.
///
/// Deserialized from an optional field: missing keeps the current handle,
/// explicit `null` removes it (leaving range mode), a number sets it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SecondValue {
    #[default]
    Keep,
    Remove,
    Set(f64),
}

impl SecondValue {
    pub fn is_keep(&self) -> bool {
        matches!(self, SecondValue::Keep)
    }
}

impl From<Option<f64>> for SecondValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => SecondValue::Set(v),
            None => SecondValue::Remove,
        }
    }
}

impl<'de> Deserialize<'de> for SecondValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(SecondValue::from)
    }
}

impl Serialize for SecondValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SecondValue::Set(v) => serializer.serialize_some(v),
            SecondValue::Keep | SecondValue::Remove => serializer.serialize_none(),
        }
    }
}

/// Model construction / update input. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "SecondValue::is_keep")]
    pub second_value: SecondValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_values: Option<LockTarget>,
}

impl ModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_second_value(mut self, second: f64) -> Self {
        self.second_value = SecondValue::Set(second);
        self
    }

    pub fn without_second_value(mut self) -> Self {
        self.second_value = SecondValue::Remove;
        self
    }

    pub fn with_locked(mut self, target: impl Into<LockTarget>) -> Self {
        self.locked_values = Some(target.into());
        self
    }

    /// True when no numeric field is supplied and the second handle is left
    /// alone. Lock requests do not count.
    pub fn is_empty(&self) -> bool {
        self.max_value.is_none()
            && self.min_value.is_none()
            && self.step.is_none()
            && self.value.is_none()
            && self.second_value.is_keep()
    }

    /// Whole-bag validity: every supplied number finite, a positive step,
    /// ordered bounds and ordered handles where both sides are supplied.
    ///
    /// The model itself never calls this; it drops bad fields one by one.
    /// Callers that want all-or-nothing semantics check first.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let supplied = [
            (StateField::MaxValue, self.max_value),
            (StateField::MinValue, self.min_value),
            (StateField::Step, self.step),
            (StateField::Value, self.value),
        ];
        for (field, value) in supplied {
            if let Some(v) = value {
                check_finite(field, v)?;
            }
        }
        if let SecondValue::Set(v) = self.second_value {
            check_finite(StateField::SecondValue, v)?;
        }

        if let Some(step) = self.step {
            check_step(step)?;
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            check_bounds(min, max)?;
        }
        if let (Some(value), SecondValue::Set(second)) = (self.value, self.second_value) {
            if second < value {
                return Err(OptionsError::SecondBelowValue { value, second });
            }
        }
        Ok(())
    }
}

// ── Field checks ─────────────────────────────────────────────────────

pub fn check_finite(field: StateField, value: f64) -> Result<f64, OptionsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OptionsError::NonFinite { field, value })
    }
}

pub fn check_step(step: f64) -> Result<f64, OptionsError> {
    check_finite(StateField::Step, step)?;
    if step > 0.0 {
        Ok(step)
    } else {
        Err(OptionsError::NonPositiveStep(step))
    }
}

/// Returns `(min, max)` when both are finite, strictly ordered and their
/// distance is itself finite.
pub fn check_bounds(min: f64, max: f64) -> Result<(f64, f64), OptionsError> {
    check_finite(StateField::MinValue, min)?;
    check_finite(StateField::MaxValue, max)?;
    if max <= min {
        return Err(OptionsError::InvertedBounds { min, max });
    }
    if !(max - min).is_finite() {
        return Err(OptionsError::RangeOverflow { min, max });
    }
    Ok((min, max))
}

pub fn check_within(field: StateField, value: f64, low: f64, high: f64) -> Result<f64, OptionsError> {
    check_finite(field, value)?;
    if (low..=high).contains(&value) {
        Ok(value)
    } else {
        Err(OptionsError::OutOfRange {
            field,
            value,
            low,
            high,
        })
    }
}
