use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_COMPLETION_ID: AtomicU64 = AtomicU64::new(1);

/// Index of a node inside a tag tree arena.
///
/// Trees built from the same configuration assign the same ids, so a `NodeId`
/// taken from one completion addresses the same tag in every other completion
/// of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Identifier of a completion or prediction within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompletionId(pub u64);

impl CompletionId {
	/// Generates a new process-unique id.
	pub fn next() -> Self {
		Self(NEXT_COMPLETION_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for CompletionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identifier of a region, as it appears in serialized results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RegionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RegionId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn completion_ids_are_unique() {
		let a = CompletionId::next();
		let b = CompletionId::next();
		assert_ne!(a, b);
	}

	#[test]
	fn region_id_serializes_as_plain_string() {
		let id = RegionId::new("r1");
		assert_eq!(serde_json::to_string(&id).unwrap(), "\"r1\"");
	}
}
