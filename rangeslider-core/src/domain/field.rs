use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A lockable slider state field.
///
/// Ordering follows declaration order, which is also the order lock sets are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateField {
    MaxValue,
    MinValue,
    Step,
    Value,
    SecondValue,
}

impl StateField {
    pub const ALL: [StateField; 5] = [
        StateField::MaxValue,
        StateField::MinValue,
        StateField::Step,
        StateField::Value,
        StateField::SecondValue,
    ];

    /// Fields pinned by a label overlay.
    pub const BOUNDS: [StateField; 3] =
        [StateField::MaxValue, StateField::MinValue, StateField::Step];

    pub fn name(self) -> &'static str {
        match self {
            StateField::MaxValue => "maxValue",
            StateField::MinValue => "minValue",
            StateField::Step => "step",
            StateField::Value => "value",
            StateField::SecondValue => "secondValue",
        }
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown state field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for StateField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Argument of `lock_state` / `unlock_state`: every field, or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockTarget {
    All,
    Fields(Vec<StateField>),
}

impl LockTarget {
    /// Build a target from field names. Unknown names are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = names
            .into_iter()
            .filter_map(|name| name.as_ref().parse().ok())
            .collect();
        LockTarget::Fields(fields)
    }

    pub fn fields(&self) -> Vec<StateField> {
        match self {
            LockTarget::All => StateField::ALL.to_vec(),
            LockTarget::Fields(fields) => fields.clone(),
        }
    }
}

impl From<StateField> for LockTarget {
    fn from(field: StateField) -> Self {
        LockTarget::Fields(vec![field])
    }
}

impl From<&[StateField]> for LockTarget {
    fn from(fields: &[StateField]) -> Self {
        LockTarget::Fields(fields.to_vec())
    }
}

impl<const N: usize> From<[StateField; N]> for LockTarget {
    fn from(fields: [StateField; N]) -> Self {
        LockTarget::Fields(fields.to_vec())
    }
}

impl From<Vec<StateField>> for LockTarget {
    fn from(fields: Vec<StateField>) -> Self {
        LockTarget::Fields(fields)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLockTarget {
    Keyword(String),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for LockTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLockTarget::deserialize(deserializer)? {
            RawLockTarget::Keyword(word) if word == "all" => LockTarget::All,
            RawLockTarget::Keyword(word) => LockTarget::from_names([word]),
            RawLockTarget::Names(names) => LockTarget::from_names(names),
        })
    }
}

impl Serialize for LockTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LockTarget::All => serializer.serialize_str("all"),
            LockTarget::Fields(fields) => fields.serialize(serializer),
        }
    }
}
