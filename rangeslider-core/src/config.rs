//! File-based slider configuration (TOML) and interaction scripts (JSON).
//!
//! ```toml
//! labels = ["xs", "s", "m", "l", "xl"]
//!
//! [model]
//! value = 1
//! secondValue = 3
//!
//! [view]
//! isHorizontal = true
//! numOfScaleVal = 4
//! ```

use crate::domain::{DisplayValue, Handles, ModelOptions};
use crate::model::Model;
use crate::presenter::{Callbacks, Presenter, PresenterOptions, SliderOptions, UserData};
use crate::view::{HeadlessView, ViewOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid slider config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid interaction script: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Initial model options, view options and label overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default)]
    pub model: ModelOptions,
    #[serde(default)]
    pub view: ViewOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<DisplayValue>>,
}

impl SliderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_toml_str(&read_file(path)?)?;
        debug!(path = %path.display(), "slider config loaded");
        Ok(config)
    }

    /// Wire a model, a headless view and a presenter from this config.
    pub fn build_headless(&self, callbacks: Callbacks) -> HeadlessSlider {
        let model = Rc::new(Model::new(&self.model));
        let view = Rc::new(HeadlessView::new(self.view.clone()));
        let mut options =
            PresenterOptions::new(Rc::clone(&model), view.clone()).with_callbacks(callbacks);
        if let Some(labels) = &self.labels {
            options = options.with_labels(labels.clone());
        }
        HeadlessSlider {
            model,
            view,
            presenter: Presenter::new(options),
        }
    }
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    /// `Presenter::update` with a flat option bag.
    Update { options: SliderOptions },
    /// `Presenter::set_user_data` with labels or numeric options.
    SetUserData { data: UserData },
    /// Pointer drag through percent positions.
    Drag { path: Vec<Handles<f64>> },
    /// Click on the track at a percent position.
    Click { position: Handles<f64> },
}

/// Ordered list of steps; a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let script = Self::from_json_str(&read_file(path)?)?;
        debug!(path = %path.display(), steps = script.steps.len(), "script loaded");
        Ok(script)
    }
}

/// A fully wired slider over a [`HeadlessView`].
pub struct HeadlessSlider {
    pub model: Rc<Model>,
    pub view: Rc<HeadlessView>,
    pub presenter: Presenter,
}

impl HeadlessSlider {
    pub fn apply(&self, step: &Step) {
        match step {
            Step::Update { options } => self.presenter.update(options),
            Step::SetUserData { data } => self.presenter.set_user_data(data.clone()),
            Step::Drag { path } => self.view.drag(path),
            Step::Click { position } => self.view.click(*position),
        }
    }
}
