//! Method Binder - callable passthroughs alongside data and computeds.
//!
//! Methods are not reactive values: no caching, no dependency tracking. Each
//! bound method receives the owning store and its arguments positionally,
//! giving uniform access alongside data and computed properties.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::store::Store;
use super::ReactiveError;

/// A bound method: owning store plus positional arguments.
pub type Method<V> = Rc<dyn Fn(&Store<V>, &[V]) -> Option<V>>;

/// Registry of an instance's methods, populated once at construction.
pub struct MethodRegistry<V> {
    methods: RefCell<HashMap<String, Method<V>>>,
}

impl<V: Clone> MethodRegistry<V> {
    pub fn new() -> Self {
        Self {
            methods: RefCell::new(HashMap::new()),
        }
    }

    /// Bind a method under `name`. Last binding wins.
    pub fn bind(
        &self,
        name: impl Into<String>,
        method: impl Fn(&Store<V>, &[V]) -> Option<V> + 'static,
    ) {
        self.methods.borrow_mut().insert(name.into(), Rc::new(method));
    }

    /// Call a bound method by name.
    pub fn call(
        &self,
        store: &Store<V>,
        name: &str,
        args: &[V],
    ) -> Result<Option<V>, ReactiveError> {
        let method = self
            .methods
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| ReactiveError::UnknownMethod(name.to_string()))?;
        Ok(method(store, args))
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.methods.borrow().contains_key(name)
    }
}

impl<V: Clone> Default for MethodRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
