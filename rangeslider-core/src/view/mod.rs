//! The rendering collaborator, as seen from the presenter.
//!
//! Geometry, pointer handling and drawing live behind [`View`]. The core
//! talks to it in percentage-space only: it pushes [`RenderData`] and
//! receives `start` / `change` / `finish` notifications through
//! [`ViewObserver`].

pub mod headless;

pub use headless::HeadlessView;

use crate::domain::{DisplayValue, Handles};
use crate::grid::{ScaleOptions, MAX_SCALE_TICKS};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Notifications a view sends to its observers.
pub trait ViewObserver {
    /// A pointer interaction began.
    fn start(&self);
    /// Handle position(s) moved, in percent of the track.
    fn change(&self, position: Handles<f64>);
    /// The pointer interaction ended.
    fn finish(&self);
    /// The view changed its own options.
    fn update(&self);
}

/// Rendering surface contract.
pub trait View {
    fn add_observer(&self, observer: Rc<dyn ViewObserver>);
    fn remove_observer(&self, observer: &Rc<dyn ViewObserver>);
    fn get_data(&self) -> ViewOptions;
    fn update(&self, options: &ViewOptions);
    fn render(&self, data: &RenderData);
    fn destroy(&self);
}

/// Derived data pushed to the view after every state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    /// Handle value(s), with overlay labels substituted when present.
    pub value: Handles<DisplayValue>,
    /// Handle position(s) in `[0, 100]`.
    pub percentage: Handles<f64>,
    /// Scale ticks in value-space (labels in overlay mode).
    pub data: Vec<DisplayValue>,
    /// `data` in percentage-space, same order and length.
    pub percentage_data: Vec<f64>,
}

/// Visual options. Used both as the view's full option set and as a patch;
/// `None` means "not set" / "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_horizontal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_interval: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_scale_val: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_scale_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_min: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_max: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,
}

impl ViewOptions {
    /// True when no option holds a value.
    pub fn is_empty(&self) -> bool {
        *self == ViewOptions::default()
    }

    /// Overwrite every option that `patch` sets.
    pub fn merge(&mut self, patch: &ViewOptions) {
        fn take<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
            if let Some(value) = source {
                *target = Some(value.clone());
            }
        }
        take(&mut self.is_horizontal, &patch.is_horizontal);
        take(&mut self.range, &patch.range);
        take(&mut self.drag_interval, &patch.drag_interval);
        take(&mut self.runner, &patch.runner);
        take(&mut self.bar, &patch.bar);
        take(&mut self.scale, &patch.scale);
        take(&mut self.num_of_scale_val, &patch.num_of_scale_val);
        take(&mut self.display_scale_value, &patch.display_scale_value);
        take(&mut self.display_value, &patch.display_value);
        take(&mut self.display_min, &patch.display_min);
        take(&mut self.display_max, &patch.display_max);
        take(&mut self.prefix, &patch.prefix);
        take(&mut self.postfix, &patch.postfix);
    }

    /// Scale tick settings with defaults for unset options.
    pub fn scale_options(&self) -> ScaleOptions {
        ScaleOptions {
            num_of_scale_val: self.num_of_scale_val.unwrap_or(MAX_SCALE_TICKS),
            display_min: self.display_min.unwrap_or(true),
            display_max: self.display_max.unwrap_or(true),
        }
    }
}
