//! Task data and `$key` value resolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The item being annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
	#[serde(default)]
	pub id: Option<u64>,
	/// Task payload. A string holding a JSON object is decoded on load.
	#[serde(default)]
	pub data: Value,
}

impl Task {
	pub fn new(id: Option<u64>, data: Value) -> Self {
		Self {
			id,
			data: decode_data(data),
		}
	}

	/// Parses a task from JSON.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let task: Task = serde_json::from_str(json)?;
		Ok(Self::new(task.id, task.data))
	}

	/// Resolves a tag `value` attribute.
	///
	/// `$key` reads the field `key` of the task data; anything else is a
	/// literal. Missing fields resolve to `None`.
	pub fn resolve(&self, value: &str) -> Option<String> {
		let Some(key) = value.strip_prefix('$') else {
			return Some(value.to_owned());
		};
		match self.data.get(key)? {
			Value::String(s) => Some(s.clone()),
			Value::Null => None,
			other => Some(other.to_string()),
		}
	}
}

fn decode_data(data: Value) -> Value {
	if let Value::String(raw) = &data {
		if let Ok(decoded @ Value::Object(_)) = serde_json::from_str::<Value>(raw) {
			return decoded;
		}
	}
	data
}
