use std::path::PathBuf;

use annotix_keymap_parser::ParseError;
use annotix_primitives::NodeId;
use annotix_registry::RegistryError;
use thiserror::Error;

/// Failure to coerce a configuration attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttrError {
	#[error("attribute `{attr}` expects true or false, got {value:?}")]
	InvalidBool { attr: String, value: String },
	#[error("attribute `{attr}` expects an integer, got {value:?}")]
	InvalidNumber { attr: String, value: String },
	#[error("attribute `{attr}` expects one of {expected}, got {value:?}")]
	InvalidValue {
		attr: String,
		value: String,
		expected: &'static str,
	},
}

/// Failure to build a tag tree from a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
	#[error(transparent)]
	Registry(#[from] RegistryError),
	#[error("<{tag}> {node}: `{attribute}` refers to unknown name {target:?}")]
	UnresolvedReference {
		tag: String,
		node: NodeId,
		attribute: &'static str,
		target: String,
	},
	#[error("name {name:?} is used by more than one tag")]
	DuplicateName { name: String },
	#[error("<{tag}> {node} must be nested inside <{expected}>")]
	Orphan {
		tag: String,
		node: NodeId,
		expected: &'static str,
	},
	#[error("<{tag}>: {source}")]
	Attribute {
		tag: String,
		#[source]
		source: AttrError,
	},
	#[error("<{tag}>: invalid hotkey {combo:?}: {source}")]
	Hotkey {
		tag: String,
		combo: String,
		#[source]
		source: ParseError,
	},
}

/// Failure to load user settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("failed to read settings from {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Malformed annotation payload.
#[derive(Debug, Error)]
pub enum ResultError {
	#[error("invalid annotation payload: {0}")]
	Json(#[from] serde_json::Error),
}

/// Failure while populating the completion store.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Build(#[from] BuildError),
	#[error(transparent)]
	Result(#[from] ResultError),
}
