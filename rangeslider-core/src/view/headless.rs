//! In-memory view: records what the presenter pushes and lets callers
//! replay pointer interactions as observer notifications.

use super::{RenderData, View, ViewObserver, ViewOptions};
use crate::domain::Handles;
use crate::observer::ObserverRegistry;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Default)]
pub struct HeadlessView {
    options: RefCell<ViewOptions>,
    frames: RefCell<Vec<RenderData>>,
    observers: RefCell<ObserverRegistry<dyn ViewObserver>>,
    destroyed: Cell<bool>,
}

impl HeadlessView {
    pub fn new(options: ViewOptions) -> Self {
        Self {
            options: RefCell::new(options),
            ..Self::default()
        }
    }

    /// Most recent render, if any.
    pub fn last_frame(&self) -> Option<RenderData> {
        self.frames.borrow().last().cloned()
    }

    /// Every render received, oldest first.
    pub fn frames(&self) -> Vec<RenderData> {
        self.frames.borrow().clone()
    }

    /// Drain the recorded renders.
    pub fn take_frames(&self) -> Vec<RenderData> {
        std::mem::take(&mut *self.frames.borrow_mut())
    }

    pub fn render_count(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Pointer down on a handle.
    pub fn press(&self) {
        self.emit(|o| o.start());
    }

    /// Pointer moved; `position` in percent of the track.
    pub fn drag_to(&self, position: Handles<f64>) {
        self.emit(|o| o.change(position));
    }

    /// Pointer released.
    pub fn release(&self) {
        self.emit(|o| o.finish());
    }

    /// Full drag gesture through the given positions.
    pub fn drag(&self, path: &[Handles<f64>]) {
        self.press();
        for position in path {
            self.drag_to(*position);
        }
        self.release();
    }

    /// Click on the track: start, a single change, finish.
    pub fn click(&self, position: Handles<f64>) {
        self.drag(&[position]);
    }

    fn emit(&self, mut f: impl FnMut(&dyn ViewObserver)) {
        if self.destroyed.get() {
            return;
        }
        // snapshot first: the presenter renders back into this view
        let observers = self.observers.borrow().snapshot();
        for observer in &observers {
            f(observer.as_ref());
        }
    }
}

impl View for HeadlessView {
    fn add_observer(&self, observer: Rc<dyn ViewObserver>) {
        self.observers.borrow_mut().add(observer);
    }

    fn remove_observer(&self, observer: &Rc<dyn ViewObserver>) {
        self.observers.borrow_mut().remove(observer);
    }

    fn get_data(&self) -> ViewOptions {
        self.options.borrow().clone()
    }

    /// Merge the patch; observers hear `update()` if anything changed.
    fn update(&self, options: &ViewOptions) {
        let changed = {
            let mut current = self.options.borrow_mut();
            let before = current.clone();
            current.merge(options);
            *current != before
        };
        if changed {
            trace!(?options, "view options changed");
            self.emit(|o| o.update());
        }
    }

    fn render(&self, data: &RenderData) {
        self.frames.borrow_mut().push(data.clone());
    }

    fn destroy(&self) {
        self.observers.borrow_mut().clear();
        self.destroyed.set(true);
    }
}
