//! Reactive Store - dependency tracking, computed caching, invalidation.
//!
//! The store holds an instance's data map and tracks, per key, which
//! computed properties read it during evaluation. Writes invalidate every
//! dependent cache transitively (dependents before the key's own cache) and
//! emit a rebuild signal for the scheduler upstream.
//!
//! # Data Flow
//!
//! ```text
//! write(key) → custom setter → notify(key) → invalidate dependents → rebuild signal
//! read(key)  → dependency collection (while a computed evaluates) → cache or data
//! ```
//!
//! Dependency attribution uses an explicit evaluation-context stack rather
//! than a single active-target slot, so a computed reading another computed
//! keeps collecting its own dependencies once the inner evaluation returns.

mod computed;
mod methods;
mod store;

use thiserror::Error;

/// Errors surfaced by the reactive layer.
///
/// Reads, writes, and notifies stay total: undefined-key reads return `None`
/// (logged in debug builds) and dependency cycles are broken and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactiveError {
    /// A method was called without being bound first.
    #[error("method \"{0}\" is not bound")]
    UnknownMethod(String),
}

pub use computed::{bind_computed, Computed};
pub use methods::{Method, MethodRegistry};
pub use store::Store;
