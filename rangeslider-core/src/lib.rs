//! Range Slider Core: numeric model, presenter and observer plumbing for a
//! one- or two-handle slider.
//!
//! This crate contains everything a slider needs except drawing:
//! - Domain types (state, option bags, lock targets, display values)
//! - Grid arithmetic (step quantization, percent conversion, scale ticks)
//! - The model: validated state with locking and change notification
//! - The view contract plus an in-memory headless view
//! - The presenter: drag lifecycle, label overlay, render data
//! - File-based configuration and interaction scripts
//!
//! Everything runs on one thread; observers are `Rc` handles notified
//! synchronously.

pub mod config;
pub mod domain;
pub mod grid;
pub mod model;
pub mod observer;
pub mod presenter;
pub mod view;

pub use config::{ConfigError, HeadlessSlider, Script, SliderConfig, Step};
pub use domain::{
    DisplayValue, Handles, LockTarget, ModelOptions, OptionsError, SecondValue, SliderState,
    StateField,
};
pub use grid::{Grid, ScaleOptions};
pub use model::{Model, ModelObserver};
pub use observer::ObserverRegistry;
pub use presenter::{Callbacks, Presenter, PresenterOptions, SliderOptions, UserData};
pub use view::{HeadlessView, RenderData, View, ViewObserver, ViewOptions};
