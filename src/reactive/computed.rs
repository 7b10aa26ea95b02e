//! Computed Property Binder - lazy cached derived values.
//!
//! A computed property pairs a getter (and optional setter) with a key on the
//! store. Reads go through [`Store::read`]: the first read evaluates the
//! getter with dependency collection active and caches the result; later
//! reads return the cache until a write to any dependency clears it.

use std::rc::Rc;

use super::store::{Getter, Setter, Store};

/// Declaration of one computed property.
pub struct Computed<V> {
    get: Getter<V>,
    set: Option<Setter<V>>,
}

impl<V: Clone> Computed<V> {
    /// Declare a computed property from its getter.
    pub fn new(get: impl Fn(&Store<V>) -> V + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: None,
        }
    }

    /// Attach a custom setter, invoked on writes to the property's key.
    pub fn with_setter(mut self, set: impl Fn(&Store<V>, V) + 'static) -> Self {
        self.set = Some(Rc::new(set));
        self
    }

    /// Bind this computed property to `name` on the store.
    ///
    /// Registers the invalidator so upstream notifies clear the cache, then
    /// installs the accessors. Re-binding a name replaces the previous
    /// definition and drops any stale cached value.
    pub fn bind(self, store: &Store<V>, name: &str) {
        store.observe(name);
        store.register_computed(name, self.get, self.set);
        store.invalidate(name);
    }
}

/// Bind a declaration map of computed properties, as supplied once at
/// instance construction.
pub fn bind_computed<V, I>(store: &Store<V>, declarations: I)
where
    V: Clone,
    I: IntoIterator<Item = (String, Computed<V>)>,
{
    for (name, computed) in declarations {
        computed.bind(store, &name);
    }
}

// =============================================================================
// Tests
// =============================================================================
