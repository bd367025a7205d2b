/// Registry failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// A tag type was registered twice under [`DuplicatePolicy::Error`].
	///
	/// [`DuplicatePolicy::Error`]: crate::DuplicatePolicy::Error
	#[error("tag type `{tag}` is already registered")]
	DuplicateTag { tag: String },

	/// A configuration referenced a tag type nobody registered.
	#[error("unknown tag type `{tag}`")]
	UnknownTag { tag: String },
}
