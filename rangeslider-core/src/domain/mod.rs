//! Domain types for the slider core

pub mod display;
pub mod field;
pub mod options;
pub mod state;

pub use display::{DisplayValue, Handles};
pub use field::{LockTarget, StateField, UnknownField};
pub use options::{ModelOptions, OptionsError, SecondValue};
pub use state::SliderState;
