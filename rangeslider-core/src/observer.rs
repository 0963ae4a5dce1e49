//! Observer registry shared by the model and view sides.
//!
//! Observers are held as `Rc<T>` and compared by allocation address, so
//! registering the same handle twice is a no-op. Notification order is
//! insertion order.

use std::fmt;
use std::rc::Rc;

/// Insertion-ordered set of observer handles.
pub struct ObserverRegistry<T: ?Sized> {
    observers: Vec<Rc<T>>,
}

impl<T: ?Sized> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer. Returns `false` if it was already registered.
    pub fn add(&mut self, observer: Rc<T>) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Unregister an observer. Returns `false` if it was not registered.
    pub fn remove(&mut self, observer: &Rc<T>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !same_handle(o, observer));
        self.observers.len() != before
    }

    pub fn contains(&self, observer: &Rc<T>) -> bool {
        self.observers.iter().any(|o| same_handle(o, observer))
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Cloned handles in insertion order.
    ///
    /// Owners that keep the registry behind a `RefCell` take a snapshot and
    /// release the borrow before calling out, so an observer may read the
    /// owner's state while being notified.
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.observers.clone()
    }

    /// Call `f` for every observer in insertion order.
    pub fn notify_all(&self, mut f: impl FnMut(&T)) {
        for observer in self.snapshot() {
            f(&observer);
        }
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl<T: ?Sized> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.observers.len())
            .finish()
    }
}

/// Address identity on the data pointer only; vtable pointers of the same
/// trait object may differ between codegen units.
fn same_handle<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    trait Listener {
        fn ping(&self);
    }

    struct Counter {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Listener for Counter {
        fn ping(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn counter(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<dyn Listener> {
        Rc::new(Counter {
            name,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn test_add_is_unique() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = counter("a", &log);
        let mut registry: ObserverRegistry<dyn Listener> = ObserverRegistry::new();

        assert!(registry.add(Rc::clone(&a)));
        assert!(!registry.add(Rc::clone(&a)));
        assert_eq!(registry.len(), 1);

        registry.notify_all(|l| l.ping());
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_notify_in_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry: ObserverRegistry<dyn Listener> = ObserverRegistry::new();
        registry.add(counter("first", &log));
        registry.add(counter("second", &log));
        registry.add(counter("third", &log));

        registry.notify_all(|l| l.ping());
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = counter("a", &log);
        let b = counter("b", &log);
        let mut registry: ObserverRegistry<dyn Listener> = ObserverRegistry::new();
        registry.add(Rc::clone(&a));
        registry.add(Rc::clone(&b));

        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert!(!registry.contains(&a));
        assert!(registry.contains(&b));

        registry.notify_all(|l| l.ping());
        assert_eq!(*log.borrow(), vec!["b"]);
    }
}
