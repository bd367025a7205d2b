//! Process-wide tag registry.
//!
//! Initialized lazily with the builtin tags. Hosts may add their own tag
//! types with [`register_tag`] before building trees.

use std::sync::LazyLock;

use annotix_registry::{InsertAction, RegistryEntry, RegistryError, TagRegistry};
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::error;

use crate::error::AttrError;
use crate::tags::{Attrs, Choice, Choices, Filter, Label, Labels, Pdf, TagKind, TagModel, Text, View};
use crate::view::{self, ViewFn};

/// Builds the variant state of a node from its attributes.
pub type Construct = fn(&Attrs) -> Result<TagKind, AttrError>;

/// How to build and present one tag type.
#[derive(Clone, Copy)]
pub struct TagEntry {
	pub tag_type: &'static str,
	pub construct: Construct,
	pub view: ViewFn,
}

impl TagEntry {
	/// Entry for a [`TagModel`] rendered by `view`.
	pub fn of<T: TagModel>(view: ViewFn) -> Self {
		Self {
			tag_type: T::TYPE,
			construct: T::construct,
			view,
		}
	}
}

impl std::fmt::Debug for TagEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TagEntry")
			.field("tag_type", &self.tag_type)
			.finish_non_exhaustive()
	}
}

impl RegistryEntry for TagEntry {
	fn tag_type(&self) -> &str {
		self.tag_type
	}
}

static TAGS: LazyLock<RwLock<TagRegistry<TagEntry>>> =
	LazyLock::new(|| RwLock::new(builtin_registry()));

/// Entries for the tags that ship with the engine.
pub fn builtins() -> [TagEntry; 8] {
	[
		TagEntry::of::<View>(view::view_container),
		TagEntry::of::<Text>(view::view_text),
		TagEntry::of::<Choices>(view::view_container),
		TagEntry::of::<Choice>(view::view_choice),
		TagEntry::of::<Labels>(view::view_container),
		TagEntry::of::<Label>(view::view_label),
		TagEntry::of::<Filter>(view::view_filter),
		TagEntry::of::<Pdf>(view::view_pdf),
	]
}

/// A fresh registry holding only the builtin tags.
pub fn builtin_registry() -> TagRegistry<TagEntry> {
	let mut registry = TagRegistry::new();
	for entry in builtins() {
		if let Err(err) = registry.register(entry) {
			error!(tag = entry.tag_type, error = %err, "builtin tag registration failed");
		}
	}
	registry
}

/// Read access to the process-wide registry.
pub fn tags() -> RwLockReadGuard<'static, TagRegistry<TagEntry>> {
	TAGS.read()
}

/// Adds a tag type to the process-wide registry.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateTag`] if the type is already registered.
pub fn register_tag(entry: TagEntry) -> Result<InsertAction, RegistryError> {
	TAGS.write().register(entry)
}

/// Restores the process-wide registry to the builtin tags.
pub fn reset_tags() {
	*TAGS.write() = builtin_registry();
}
