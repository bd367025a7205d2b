//! Declarative interface configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One element of a labeling configuration.
///
/// Mirrors the JSON form `{ "tagName": "Choices", "attributes": {...},
/// "children": [...] }`. Attribute names are matched case-insensitively by the
/// tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigNode {
	pub tag_name: String,
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
	#[serde(default)]
	pub children: Vec<ConfigNode>,
}

impl ConfigNode {
	pub fn new(tag_name: impl Into<String>) -> Self {
		Self {
			tag_name: tag_name.into(),
			attributes: BTreeMap::new(),
			children: Vec::new(),
		}
	}

	/// Adds or replaces an attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}

	/// Appends a child element.
	pub fn child(mut self, child: ConfigNode) -> Self {
		self.children.push(child);
		self
	}

	/// Appends several child elements in order.
	pub fn children(mut self, children: impl IntoIterator<Item = ConfigNode>) -> Self {
		self.children.extend(children);
		self
	}

	/// Parses a configuration tree from JSON.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Counts this element and all of its descendants.
	pub fn count_nodes(&self) -> usize {
		1 + self.children.iter().map(ConfigNode::count_nodes).sum::<usize>()
	}
}
