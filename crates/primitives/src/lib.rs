//! Core types shared across the annotation engine: identifiers and key events.

/// Identifier types for tree nodes, completions and regions.
pub mod ids;
/// Key event types.
pub mod key;

pub use ids::{CompletionId, NodeId, RegionId};
pub use key::{KeyCode, KeyEvent, Modifiers};
