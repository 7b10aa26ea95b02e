//! # cinder-ui
//!
//! Minimal reactive UI runtime core.
//!
//! Two independent, composable pieces:
//!
//! - [`compiler`] - a markup lexer that turns a template string into a flat
//!   token stream (text / comment / tag with attributes). Pure function of
//!   its input; malformed markup degrades into best-effort tokens instead of
//!   failing.
//! - [`reactive`] - a per-instance store that records which computed
//!   properties depend on which keys while they evaluate, caches computed
//!   values lazily, invalidates them transitively on writes, and signals the
//!   glue layer to rebuild.
//!
//! ## Architecture
//!
//! ```text
//! template string → tokenize → token stream → (external compiler/renderer)
//! write(key) → notify dependents → clear caches → rebuild signal → (external scheduler)
//! ```
//!
//! Everything outside these two cores (virtual-DOM diffing, DOM mounting,
//! event dispatch, lifecycle, key-path resolution) belongs to the glue layer
//! and is out of scope here.
//!
//! Execution is single-threaded and synchronous: every operation runs to
//! completion before the caller regains control.

pub mod compiler;
pub mod reactive;

// Re-export commonly used items
pub use compiler::{tokenize, Attribute, AttributeMap, TagFlags, TagToken, Token};
pub use reactive::{bind_computed, Computed, Method, MethodRegistry, ReactiveError, Store};
