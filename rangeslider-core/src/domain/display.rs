use serde::{Deserialize, Serialize};
use std::fmt;

/// One or two handle positions.
///
/// Serialized untagged: a single handle is a bare value, a range is a
/// two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Handles<T> {
    Single(T),
    Pair(T, T),
}

impl<T> Handles<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Handles<U> {
        match self {
            Handles::Single(a) => Handles::Single(f(a)),
            Handles::Pair(a, b) => Handles::Pair(f(a), f(b)),
        }
    }

    pub fn first(&self) -> &T {
        match self {
            Handles::Single(a) | Handles::Pair(a, _) => a,
        }
    }

    pub fn second(&self) -> Option<&T> {
        match self {
            Handles::Single(_) => None,
            Handles::Pair(_, b) => Some(b),
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Handles::Pair(..))
    }
}

impl<T: fmt::Display> fmt::Display for Handles<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handles::Single(a) => write!(f, "{a}"),
            Handles::Pair(a, b) => write!(f, "{a} .. {b}"),
        }
    }
}

/// A scale or handle label: a plain number or an arbitrary text entry from a
/// label overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl DisplayValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DisplayValue::Number(n) => Some(*n),
            DisplayValue::Text(_) => None,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(n) => write!(f, "{n}"),
            DisplayValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for DisplayValue {
    fn from(n: f64) -> Self {
        DisplayValue::Number(n)
    }
}

impl From<i32> for DisplayValue {
    fn from(n: i32) -> Self {
        DisplayValue::Number(f64::from(n))
    }
}

impl From<&str> for DisplayValue {
    fn from(s: &str) -> Self {
        DisplayValue::Text(s.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(s: String) -> Self {
        DisplayValue::Text(s)
    }
}
