//! Collision policy for repeated tag-type registration.

/// How a registry reacts when a tag type is registered twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Reject the new entry with [`RegistryError::DuplicateTag`].
	///
	/// [`RegistryError::DuplicateTag`]: crate::RegistryError::DuplicateTag
	#[default]
	Error,
	/// Keep the first definition seen.
	FirstWins,
	/// Overwrite with the last definition seen.
	LastWins,
}

/// Result of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Name was new; entry inserted.
	InsertedNew,
	/// Name existed; kept the existing entry.
	KeptExisting,
	/// Name existed; replaced with the new entry.
	ReplacedExisting,
}
