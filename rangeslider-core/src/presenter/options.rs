use crate::domain::{DisplayValue, LockTarget, ModelOptions, SliderState};
use crate::view::ViewOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a caller may pass to [`super::Presenter::update`].
///
/// Deserializes from one flat object: numeric keys land in `model`, visual
/// keys in `view`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderOptions {
    #[serde(flatten)]
    pub model: ModelOptions,
    #[serde(flatten)]
    pub view: ViewOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_values: Option<LockTarget>,
}

impl SliderOptions {
    pub fn model(model: ModelOptions) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn view(view: ViewOptions) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// The numeric sub-bag, without lock requests.
    pub fn model_update(&self) -> ModelOptions {
        ModelOptions {
            locked_values: None,
            ..self.model.clone()
        }
    }
}

/// Argument of [`super::Presenter::set_user_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserData {
    /// Replace the numeric domain with an ordered label set.
    Labels(Vec<DisplayValue>),
    /// Drop any label set and apply numeric options.
    Options(ModelOptions),
}

impl From<Vec<DisplayValue>> for UserData {
    fn from(labels: Vec<DisplayValue>) -> Self {
        UserData::Labels(labels)
    }
}

impl From<ModelOptions> for UserData {
    fn from(options: ModelOptions) -> Self {
        UserData::Options(options)
    }
}

type StateCallback = Box<dyn Fn(&SliderState)>;

/// Hooks invoked by the presenter. All default to no-ops.
pub struct Callbacks {
    pub(crate) on_start: StateCallback,
    pub(crate) on_change: StateCallback,
    pub(crate) on_finish: StateCallback,
    pub(crate) on_update: Box<dyn Fn()>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer interaction began.
    pub fn on_start(mut self, f: impl Fn(&SliderState) + 'static) -> Self {
        self.on_start = Box::new(f);
        self
    }

    /// Model changed during a pointer interaction.
    pub fn on_change(mut self, f: impl Fn(&SliderState) + 'static) -> Self {
        self.on_change = Box::new(f);
        self
    }

    /// Pointer interaction ended.
    pub fn on_finish(mut self, f: impl Fn(&SliderState) + 'static) -> Self {
        self.on_finish = Box::new(f);
        self
    }

    /// A caller-initiated `update` finished forwarding.
    pub fn on_update(mut self, f: impl Fn() + 'static) -> Self {
        self.on_update = Box::new(f);
        self
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            on_start: Box::new(|_| {}),
            on_change: Box::new(|_| {}),
            on_finish: Box::new(|_| {}),
            on_update: Box::new(|| {}),
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callbacks { .. }")
    }
}

/// Presenter-owned data, exposed read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenterData {
    /// The label overlay; empty when the slider is numeric.
    pub data_values: Vec<DisplayValue>,
    /// Current scale ticks in value-space.
    pub render_data: Vec<DisplayValue>,
}

/// Model, view and presenter data in one flat record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllData {
    #[serde(flatten)]
    pub model: SliderState,
    #[serde(flatten)]
    pub view: ViewOptions,
    #[serde(flatten)]
    pub presenter: PresenterData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SecondValue, StateField};

    #[test]
    fn test_slider_options_split_flat_object() {
        let options: SliderOptions = serde_json::from_str(
            r#"{
                "maxValue": 50,
                "secondValue": null,
                "numOfScaleVal": 4,
                "prefix": "$",
                "lockedValues": ["step"],
                "unlockValues": "all"
            }"#,
        )
        .unwrap();

        assert_eq!(options.model.max_value, Some(50.0));
        assert_eq!(options.model.second_value, SecondValue::Remove);
        assert_eq!(
            options.model.locked_values,
            Some(LockTarget::Fields(vec![StateField::Step]))
        );
        assert_eq!(options.view.num_of_scale_val, Some(4));
        assert_eq!(options.view.prefix.as_deref(), Some("$"));
        assert_eq!(options.unlock_values, Some(LockTarget::All));

        let numeric = options.model_update();
        assert!(numeric.locked_values.is_none());
        assert_eq!(numeric.max_value, Some(50.0));
    }

    #[test]
    fn test_user_data_shape_dispatch() {
        let labels: UserData = serde_json::from_str(r#"["a", "b", 3]"#).unwrap();
        assert!(matches!(labels, UserData::Labels(ref l) if l.len() == 3));

        let options: UserData = serde_json::from_str(r#"{"maxValue": 20}"#).unwrap();
        assert!(matches!(options, UserData::Options(ref o) if o.max_value == Some(20.0)));
    }
}
