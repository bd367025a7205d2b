//! Tag-type registry.
//!
//! A [`TagRegistry`] maps a tag-type name (`"choice"`, `"filter"`, ...) to an
//! entry describing how to build and present nodes of that type. Entries are
//! registered once at startup and resolved by the tree builder.
//!
//! Names are case-insensitive: configs write `<Choices>` while entries are
//! registered as `"choices"`.
//!
//! # Collisions
//!
//! What happens when a name is registered twice is governed by
//! [`DuplicatePolicy`]. The default rejects the second registration with
//! [`RegistryError::DuplicateTag`].

mod collision;
mod error;
mod table;

pub use collision::{DuplicatePolicy, InsertAction};
pub use error::RegistryError;
pub use table::{RegistryEntry, TagRegistry};
