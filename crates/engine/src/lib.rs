//! Annotation engine: declarative tag trees and the annotation state built on
//! top of them.
//!
//! A labeling interface is described by a [`ConfigNode`] tree. The
//! [`TreeBuilder`] resolves every node through the tag [`registry`] into a
//! [`TagTree`], an arena of [`TagNode`]s linked by [`NodeId`]. Each
//! [`Completion`] owns one tree together with its regions, relations and undo
//! [`History`]; the [`CompletionStore`] keeps exactly one of them selected.
//!
//! The [`AppStore`] is the root: it owns the store, the task, the interface
//! flags and user [`Settings`], and routes key events through the focused
//! filter before the process-wide [`hotkeys`] table.
//!
//! [`NodeId`]: annotix_primitives::NodeId

pub mod app;
pub mod completion;
pub mod config;
pub mod error;
mod filter;
#[cfg(test)]
mod fixtures;
pub mod history;
pub mod hotkeys;
pub mod regions;
pub mod registry;
pub mod result;
pub mod settings;
pub mod store;
pub mod tags;
pub mod task;
pub mod tree;
pub mod view;

pub use app::{AppEvents, AppStore, Flags, NoopEvents, SubmitOutcome};
pub use completion::{AnnotationState, Completion, CompletionKind, Focus, ValidationIssue};
pub use config::ConfigNode;
pub use error::{AttrError, BuildError, EngineError, ResultError, SettingsError};
pub use filter::FilterKey;
pub use history::{Edit, History, MAX_HISTORY, Transaction};
pub use regions::{Region, RegionStore, Relation, RelationStore};
pub use registry::{TagEntry, register_tag, reset_tags, tags};
pub use result::{ControlResult, ControlValue, InitItem, InitPayload, RelationResult, ResultItem};
pub use settings::Settings;
pub use store::CompletionStore;
pub use tags::{TagKind, TagModel, TagNode};
pub use task::Task;
pub use tree::{TagTree, TreeBuilder, UnresolvedReference};
pub use view::{RenderContext, Widget};
