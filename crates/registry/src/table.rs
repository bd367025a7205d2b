use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{DuplicatePolicy, InsertAction, RegistryError};

/// An entry that can be stored in a [`TagRegistry`].
pub trait RegistryEntry {
	/// The tag-type name this entry is registered under.
	fn tag_type(&self) -> &str;
}

/// Table of tag-type entries with O(1) case-insensitive lookup.
///
/// Iteration follows registration order; a replaced entry keeps the slot of
/// the one it replaced.
#[derive(Debug)]
pub struct TagRegistry<E> {
	entries: Vec<E>,
	by_name: FxHashMap<Box<str>, usize>,
	policy: DuplicatePolicy,
}

impl<E> Default for TagRegistry<E> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			by_name: FxHashMap::default(),
			policy: DuplicatePolicy::default(),
		}
	}
}

impl<E: RegistryEntry> TagRegistry<E> {
	/// Creates an empty registry with the default (erroring) duplicate policy.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry with the given duplicate policy.
	pub fn with_policy(policy: DuplicatePolicy) -> Self {
		Self {
			policy,
			..Self::default()
		}
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// Registers `entry` under its tag type.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::DuplicateTag`] if the name is taken and the
	/// policy is [`DuplicatePolicy::Error`].
	pub fn register(&mut self, entry: E) -> Result<InsertAction, RegistryError> {
		let key = normalize(entry.tag_type());

		let Some(&slot) = self.by_name.get(key.as_str()) else {
			debug!(tag = %key, "tag type registered");
			self.by_name.insert(key.into_boxed_str(), self.entries.len());
			self.entries.push(entry);
			return Ok(InsertAction::InsertedNew);
		};

		match self.policy {
			DuplicatePolicy::Error => Err(RegistryError::DuplicateTag { tag: key }),
			DuplicatePolicy::FirstWins => {
				debug!(tag = %key, "duplicate tag type ignored");
				Ok(InsertAction::KeptExisting)
			}
			DuplicatePolicy::LastWins => {
				debug!(tag = %key, "tag type overwritten");
				self.entries[slot] = entry;
				Ok(InsertAction::ReplacedExisting)
			}
		}
	}

	/// Looks up an entry by tag type.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::UnknownTag`] if nothing is registered under `tag`.
	pub fn resolve(&self, tag: &str) -> Result<&E, RegistryError> {
		self.get(tag).ok_or_else(|| RegistryError::UnknownTag { tag: normalize(tag) })
	}

	/// Looks up an entry by tag type.
	pub fn get(&self, tag: &str) -> Option<&E> {
		let slot = self.by_name.get(normalize(tag).as_str())?;
		self.entries.get(*slot)
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.get(tag).is_some()
	}

	/// Returns entries in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.by_name.clear();
	}
}

fn normalize(tag: &str) -> String {
	tag.trim().to_ascii_lowercase()
}
