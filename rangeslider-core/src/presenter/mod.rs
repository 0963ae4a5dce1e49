//! Presenter: brokers between the model (numeric truth) and the view
//! (percentage-space rendering), and owns the optional label overlay.
//!
//! Wiring: the presenter subscribes to both sides through small link
//! objects holding a `Weak` back-reference, so the model and view never keep
//! the presenter alive. All calls are synchronous; a model notification
//! triggered by a presenter call is fully handled before that call returns.
//!
//! Drag lifecycle: `change` from the view sets `is_changing`; model
//! notifications then fire `on_change` before the render push. `finish`
//! fires `on_finish` and clears the flag, so later non-drag notifications
//! render without `on_change`.

pub mod options;
pub mod render;

pub use options::{AllData, Callbacks, PresenterData, SliderOptions, UserData};

use crate::domain::{DisplayValue, Handles, ModelOptions, SliderState, StateField};
use crate::model::{Model, ModelObserver};
use crate::view::{RenderData, View, ViewObserver, ViewOptions};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Construction input.
pub struct PresenterOptions {
    pub model: Rc<Model>,
    pub view: Rc<dyn View>,
    /// Optional label overlay; needs at least two entries.
    pub data_values: Option<Vec<DisplayValue>>,
    pub callbacks: Callbacks,
}

impl PresenterOptions {
    pub fn new(model: Rc<Model>, view: Rc<dyn View>) -> Self {
        Self {
            model,
            view,
            data_values: None,
            callbacks: Callbacks::default(),
        }
    }

    pub fn with_labels(mut self, labels: Vec<DisplayValue>) -> Self {
        self.data_values = Some(labels);
        self
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}

#[derive(Debug, Default)]
struct PresenterState {
    data_values: Vec<DisplayValue>,
    render_data: Vec<DisplayValue>,
    is_changing: bool,
}

struct Inner {
    model: Rc<Model>,
    view: Rc<dyn View>,
    callbacks: Callbacks,
    state: RefCell<PresenterState>,
}

/// Presenter handle. Dropping it unsubscribes from the model and the view.
pub struct Presenter {
    inner: Rc<Inner>,
    model_link: Rc<dyn ModelObserver>,
    view_link: Rc<dyn ViewObserver>,
}

impl Presenter {
    /// Bind to `model` and `view`, install labels if given, subscribe to
    /// both sides and push the initial render.
    pub fn new(options: PresenterOptions) -> Self {
        let inner = Rc::new(Inner {
            model: options.model,
            view: options.view,
            callbacks: options.callbacks,
            state: RefCell::new(PresenterState::default()),
        });

        if let Some(labels) = options.data_values {
            // not subscribed yet: no notification round-trip
            inner.install_labels(labels);
        }

        let model_link: Rc<dyn ModelObserver> = Rc::new(ModelLink(Rc::downgrade(&inner)));
        let view_link: Rc<dyn ViewObserver> = Rc::new(ViewLink(Rc::downgrade(&inner)));
        inner.model.add_observer(Rc::clone(&model_link));
        inner.view.add_observer(Rc::clone(&view_link));

        inner.render();

        Self {
            inner,
            model_link,
            view_link,
        }
    }

    /// Forward a mixed option bag: numeric keys to the model, lock requests
    /// to the lock set, visual keys to the view. `on_update` fires
    /// afterwards in every case.
    pub fn update(&self, options: &SliderOptions) {
        let inner = &self.inner;

        let numeric = options.model_update();
        if !numeric.is_empty() {
            inner.model.update_state(&numeric);
        }
        if let Some(target) = &options.model.locked_values {
            inner.model.lock_state(target.clone());
        }
        if let Some(target) = &options.unlock_values {
            inner.model.unlock_state(target.clone());
        }
        if !options.view.is_empty() {
            inner.view.update(&options.view);
        }

        (inner.callbacks.on_update)();
    }

    /// Install a label overlay, or return to a numeric domain.
    ///
    /// A label set needs at least two entries to span a domain. Shorter sets
    /// are ignored with a warning and the current overlay, if any, stays.
    ///
    /// Numeric options are all-or-nothing here: a bag that fails
    /// [`ModelOptions::validate`] is ignored entirely.
    pub fn set_user_data(&self, data: impl Into<UserData>) {
        let inner = &self.inner;
        match data.into() {
            UserData::Labels(labels) => {
                if !inner.install_labels(labels) {
                    inner.render();
                }
            }
            UserData::Options(options) => {
                if let Err(err) = options.validate() {
                    warn!(%err, "user options rejected");
                    return;
                }
                inner.state.borrow_mut().data_values.clear();
                inner.model.unlock_state(StateField::BOUNDS);
                if let Some(target) = &options.locked_values {
                    inner.model.lock_state(target.clone());
                }
                debug!("label overlay cleared");
                if !inner.model.update_state(&options) {
                    inner.render();
                }
            }
        }
    }

    pub fn get_all_data(&self) -> AllData {
        AllData {
            model: self.get_model_data(),
            view: self.get_view_data(),
            presenter: self.get_presenter_data(),
        }
    }

    pub fn get_model_data(&self) -> SliderState {
        self.inner.model.get_state()
    }

    pub fn get_view_data(&self) -> ViewOptions {
        self.inner.view.get_data()
    }

    pub fn get_presenter_data(&self) -> PresenterData {
        let state = self.inner.state.borrow();
        PresenterData {
            data_values: state.data_values.clone(),
            render_data: state.render_data.clone(),
        }
    }

    /// True between the first `change` of a drag and its `finish`.
    pub fn is_changing(&self) -> bool {
        self.inner.state.borrow().is_changing
    }

    /// Current value mapped into `[0, 100]`, snapped to one-step granularity.
    pub fn value_to_percent(&self, value: f64) -> f64 {
        self.inner.model.get_state().grid().value_to_percent(value)
    }

    /// Percent position(s) mapped back into value-space.
    pub fn percent_to_value(&self, percent: Handles<f64>) -> Handles<f64> {
        let grid = self.inner.model.get_state().grid();
        percent.map(|p| grid.percent_to_value(p))
    }

    /// Numeric scale ticks for the current model and view options.
    pub fn create_data_values(&self) -> Vec<f64> {
        let scale = self.inner.view.get_data().scale_options();
        self.inner.model.get_state().grid().ticks(&scale)
    }

    /// [`Presenter::create_data_values`] in percentage-space.
    pub fn create_percentage_data(&self) -> Vec<f64> {
        let scale = self.inner.view.get_data().scale_options();
        self.inner
            .model
            .get_state()
            .grid()
            .percentage_ticks(&scale)
    }

    /// Tear down: unsubscribe and destroy the view.
    pub fn destroy(self) {
        self.inner.view.destroy();
        debug!("presenter destroyed");
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        self.inner.model.remove_observer(&self.model_link);
        self.inner.view.remove_observer(&self.view_link);
    }
}

impl Inner {
    /// Store labels and pin the model domain to their indices.
    ///
    /// Returns whether the model changed (and therefore already notified).
    /// Fewer than two labels cannot span a domain and are ignored.
    fn install_labels(&self, labels: Vec<DisplayValue>) -> bool {
        if labels.len() < 2 {
            warn!(count = labels.len(), "label overlay needs at least two entries");
            return false;
        }
        let last = (labels.len() - 1) as f64;
        debug!(count = labels.len(), "label overlay installed");
        self.state.borrow_mut().data_values = labels;

        // a previous overlay may have locked the bounds
        self.model.unlock_state(StateField::BOUNDS);
        let changed = self.model.update_state(
            &ModelOptions::new()
                .with_bounds(0.0, last)
                .with_step(1.0),
        );
        self.model.lock_state(StateField::BOUNDS);
        changed
    }

    /// Recompute scale data from current model and view state.
    fn recompute(&self) -> RenderData {
        let model_state = self.model.get_state();
        let scale = self.view.get_data().scale_options();
        let mut state = self.state.borrow_mut();
        let data = render::build_render_data(&model_state, &scale, &state.data_values);
        state.render_data = data.data.clone();
        data
    }

    fn render(&self) {
        let data = self.recompute();
        self.view.render(&data);
    }

    fn on_model_update(&self) {
        let data = self.recompute();
        if self.state.borrow().is_changing {
            (self.callbacks.on_change)(&self.model.get_state());
        }
        self.view.render(&data);
    }

    fn on_view_start(&self) {
        trace!("drag start");
        (self.callbacks.on_start)(&self.model.get_state());
    }

    fn on_view_change(&self, position: Handles<f64>) {
        self.state.borrow_mut().is_changing = true;
        let grid = self.model.get_state().grid();
        let options = match position.map(|p| grid.percent_to_value(p)) {
            Handles::Single(value) => ModelOptions::new().with_value(value),
            Handles::Pair(value, second) => {
                ModelOptions::new().with_value(value).with_second_value(second)
            }
        };
        trace!(?position, "drag change");
        self.model.update_state(&options);
    }

    fn on_view_finish(&self) {
        trace!("drag finish");
        (self.callbacks.on_finish)(&self.model.get_state());
        self.state.borrow_mut().is_changing = false;
    }
}

struct ModelLink(Weak<Inner>);

impl ModelObserver for ModelLink {
    fn update(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.on_model_update();
        }
    }
}

struct ViewLink(Weak<Inner>);

impl ViewObserver for ViewLink {
    fn start(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.on_view_start();
        }
    }

    fn change(&self, position: Handles<f64>) {
        if let Some(inner) = self.0.upgrade() {
            inner.on_view_change(position);
        }
    }

    fn finish(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.on_view_finish();
        }
    }

    fn update(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.render();
        }
    }
}
