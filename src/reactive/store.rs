//! Reactive Store - data map, dependency tracking, and cache invalidation.
//!
//! One `Store` per reactive instance. Reads issued while a computed property
//! is being evaluated record a dependency edge; writes invalidate every
//! computed that (transitively) depends on the written key, then emit the
//! rebuild signal.
//!
//! Everything is single-threaded and synchronous: each operation runs to
//! completion before the caller regains control, so interior mutability via
//! `RefCell` is all the synchronization there is.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{error, warn};

/// A computed property's getter. Receives the owning store so it can read
/// other keys (and have those reads tracked as dependencies).
pub(super) type Getter<V> = Rc<dyn Fn(&Store<V>) -> V>;

/// A custom setter, invoked on writes to its key.
pub(super) type Setter<V> = Rc<dyn Fn(&Store<V>, V)>;

/// Per-instance reactive store.
///
/// Holds the backing data map plus the bookkeeping that makes computed
/// properties lazy and consistent:
///
/// - `dependents` - key → computed names that read it during evaluation
///   (insertion-ordered, duplicate-free)
/// - `cache` - computed values; invalidation clears the slot in place
/// - `eval_stack` - the computed properties currently mid-evaluation, top of
///   stack being the one reads are attributed to
pub struct Store<V> {
    data: RefCell<HashMap<String, V>>,
    dependents: RefCell<HashMap<String, Vec<String>>>,
    cache: RefCell<HashMap<String, Option<V>>>,
    observed: RefCell<HashSet<String>>,
    getters: RefCell<HashMap<String, Getter<V>>>,
    setters: RefCell<HashMap<String, Setter<V>>>,
    eval_stack: RefCell<Vec<String>>,
    notifying: RefCell<HashSet<String>>,
    rebuild: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<V: Clone> Store<V> {
    /// Create a store over an initial data map.
    pub fn new(data: HashMap<String, V>) -> Self {
        Self {
            data: RefCell::new(data),
            dependents: RefCell::new(HashMap::new()),
            cache: RefCell::new(HashMap::new()),
            observed: RefCell::new(HashSet::new()),
            getters: RefCell::new(HashMap::new()),
            setters: RefCell::new(HashMap::new()),
            eval_stack: RefCell::new(Vec::new()),
            notifying: RefCell::new(HashSet::new()),
            rebuild: RefCell::new(None),
        }
    }

    /// Read a key, recording a dependency if a computed is being evaluated.
    ///
    /// Computed keys are served from cache when populated and lazily
    /// evaluated otherwise. Reading an absent key returns `None`; in debug
    /// builds the access is also logged as a diagnostic.
    pub fn read(&self, key: &str) -> Option<V> {
        self.track(key);

        if self.getters.borrow().contains_key(key) {
            return self.read_computed(key);
        }

        match self.data.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => {
                if cfg!(debug_assertions) {
                    warn!("\"{key}\" was not defined but was referenced");
                }
                None
            }
        }
    }

    /// Read the data map directly, without dependency tracking.
    pub fn peek(&self, key: &str) -> Option<V> {
        self.data.borrow().get(key).cloned()
    }

    /// True if `key` is a data entry or a bound computed property.
    pub fn contains(&self, key: &str) -> bool {
        self.data.borrow().contains_key(key) || self.getters.borrow().contains_key(key)
    }

    /// Write a key, invalidate its dependents, and signal a rebuild.
    ///
    /// Writes to computed keys skip the data map: they delegate to the
    /// custom setter when one is bound and are otherwise value no-ops, but
    /// still notify and signal.
    pub fn write(&self, key: &str, value: V) {
        if !self.getters.borrow().contains_key(key) {
            self.data.borrow_mut().insert(key.to_string(), value.clone());
        }

        let setter = self.setters.borrow().get(key).cloned();
        if let Some(setter) = setter {
            setter(self, value);
        }

        self.notify(key);
        self.emit_rebuild();
    }

    /// Invalidate everything depending on `key`, dependents first.
    ///
    /// Each dependent is notified before `key`'s own cache slot is cleared,
    /// so by the time a property's cache drops, everything reading it has
    /// already been invalidated. A currently-notifying marker breaks
    /// dependency cycles instead of recursing unboundedly.
    pub fn notify(&self, key: &str) {
        if !self.notifying.borrow_mut().insert(key.to_string()) {
            warn!("dependency cycle through \"{key}\" while notifying; skipping re-entry");
            return;
        }

        let dependents = self.dependents.borrow().get(key).cloned();
        if let Some(dependents) = dependents {
            for dependent in &dependents {
                self.notify(dependent);
            }
        }

        if self.observed.borrow().contains(key) {
            self.invalidate(key);
        }

        self.notifying.borrow_mut().remove(key);
    }

    /// Register `key`'s invalidator (a cache clear). Idempotent.
    pub fn observe(&self, key: &str) {
        self.observed.borrow_mut().insert(key.to_string());
    }

    /// Install the rebuild-signal consumer, replacing any previous one.
    /// The signal fires after every `write`; a hook may install its own
    /// replacement while it runs.
    pub fn on_rebuild(&self, hook: impl Fn() + 'static) {
        *self.rebuild.borrow_mut() = Some(Rc::new(hook));
    }

    /// True if `key` currently holds a cached computed value.
    pub fn is_cached(&self, key: &str) -> bool {
        matches!(self.cache.borrow().get(key), Some(Some(_)))
    }

    pub(super) fn register_computed(&self, key: &str, getter: Getter<V>, setter: Option<Setter<V>>) {
        self.getters.borrow_mut().insert(key.to_string(), getter);
        match setter {
            Some(setter) => {
                self.setters.borrow_mut().insert(key.to_string(), setter);
            }
            None => {
                self.setters.borrow_mut().remove(key);
            }
        }
    }

    pub(super) fn invalidate(&self, key: &str) {
        self.cache.borrow_mut().insert(key.to_string(), None);
    }

    /// Record `key → active target` while dependency collection is running.
    fn track(&self, key: &str) {
        let Some(target) = self.eval_stack.borrow().last().cloned() else {
            return;
        };
        let mut dependents = self.dependents.borrow_mut();
        let entries = dependents.entry(key.to_string()).or_default();
        if !entries.contains(&target) {
            entries.push(target);
        }
    }

    fn read_computed(&self, key: &str) -> Option<V> {
        if let Some(Some(cached)) = self.cache.borrow().get(key) {
            return Some(cached.clone());
        }

        // A key already mid-evaluation reading itself is a dependency cycle;
        // evaluating it again would recurse forever
        if self.eval_stack.borrow().iter().any(|active| active == key) {
            error!("computed \"{key}\" depends on itself; returning no value");
            return None;
        }

        let getter = self.getters.borrow().get(key)?.clone();

        // Push the evaluation target; the guard pops it even if the getter
        // panics, so no stale target leaks to the caller
        self.eval_stack.borrow_mut().push(key.to_string());
        let value = {
            let _guard = EvalGuard { store: self };
            getter(self)
        };

        self.cache
            .borrow_mut()
            .insert(key.to_string(), Some(value.clone()));
        Some(value)
    }

    fn emit_rebuild(&self) {
        // Clone the hook out so it can replace itself without re-borrowing
        let hook = self.rebuild.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Snapshot of the recorded dependents of `key`, for assertions.
    #[cfg(test)]
    pub(super) fn dependents_of(&self, key: &str) -> Vec<String> {
        self.dependents.borrow().get(key).cloned().unwrap_or_default()
    }
}

impl<V: Clone> Default for Store<V> {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

/// Pops the evaluation stack on drop, unwinding included.
struct EvalGuard<'store, V> {
    store: &'store Store<V>,
}

impl<V> Drop for EvalGuard<'_, V> {
    fn drop(&mut self) {
        self.store.eval_stack.borrow_mut().pop();
    }
}

// =============================================================================
// Tests
// =============================================================================
