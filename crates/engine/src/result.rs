//! Annotation results: the serialized form of a completion.
//!
//! ```json
//! [
//!   { "type": "choices", "from_name": "fruit", "to_name": "text",
//!     "value": { "choices": ["Apple"] } },
//!   { "type": "labels", "id": "a1", "from_name": "label", "to_name": "text",
//!     "value": { "start": 0, "end": 3, "labels": ["PER"] } },
//!   { "type": "relation", "from_id": "a1", "to_id": "b2" }
//! ]
//! ```

use annotix_primitives::{NodeId, RegionId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::completion::Completion;
use crate::error::ResultError;
use crate::history::EditScope;
use crate::regions::{Region, Relation, Values};
use crate::completion::selection::unselect_all;
use crate::tags::{ChoiceMode, TagKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultItem {
	Choices(ControlResult),
	Labels(ControlResult),
	Relation(RelationResult),
}

/// Values of one group, either for the whole task or for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<RegionId>,
	pub from_name: String,
	pub to_name: String,
	pub value: ControlValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlValue {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub choices: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub labels: Option<Vec<String>>,
	/// Region geometry; empty for task-level classifications.
	#[serde(flatten)]
	pub region: Map<String, Value>,
}

impl ControlValue {
	pub fn values(&self) -> &[String] {
		self.choices
			.as_deref()
			.or(self.labels.as_deref())
			.unwrap_or_default()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationResult {
	pub from_id: RegionId,
	pub to_id: RegionId,
}

/// Existing annotations handed to the app on startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitPayload {
	#[serde(default)]
	pub completions: Vec<InitItem>,
	#[serde(default)]
	pub predictions: Vec<InitItem>,
}

impl InitPayload {
	pub fn from_json(json: &str) -> Result<Self, ResultError> {
		Ok(serde_json::from_str(json)?)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitItem {
	#[serde(default)]
	pub id: Option<Value>,
	#[serde(default)]
	pub result: Vec<ResultItem>,
}

impl InitItem {
	/// The item id as a string key.
	pub fn pk(&self) -> Option<String> {
		match self.id.as_ref()? {
			Value::String(s) => Some(s.clone()),
			Value::Null => None,
			other => Some(other.to_string()),
		}
	}
}

fn control(kind: &TagKind, item: ControlResult) -> Option<ResultItem> {
	match kind {
		TagKind::Choices(_) => Some(ResultItem::Choices(item)),
		TagKind::Labels(_) => Some(ResultItem::Labels(item)),
		_ => None,
	}
}

fn control_value(kind: &TagKind, values: Vec<String>, region: Map<String, Value>) -> ControlValue {
	let (choices, labels) = match kind {
		TagKind::Labels(_) => (None, Some(values)),
		_ => (Some(values), None),
	};
	ControlValue {
		choices,
		labels,
		region,
	}
}

impl Completion {
	/// Serializes the annotation: task-level selections, region states, then
	/// relations.
	pub fn serialize(&self) -> Vec<ResultItem> {
		let tree = self.tree();
		let mut items = Vec::new();

		for node in tree.iter() {
			let Some(group) = node.kind.as_group() else {
				continue;
			};
			if group.per_region || matches!(node.kind, TagKind::Labels(_)) {
				continue;
			}
			let Some(name) = &node.name else {
				continue;
			};
			let values = tree.selected_values(node.id);
			if values.is_empty() {
				continue;
			}
			let value = control_value(&node.kind, values.into_vec(), Map::new());
			items.extend(control(
				&node.kind,
				ControlResult {
					id: None,
					from_name: name.clone(),
					to_name: group.to_name.clone().unwrap_or_default(),
					value,
				},
			));
		}

		for region in self.regions().iter() {
			let to_name = tree
				.get(region.owner)
				.and_then(|n| n.name.clone())
				.unwrap_or_default();
			for (group_name, values) in &region.states {
				let Some(group) = tree.named(group_name) else {
					warn!(region = %region.id, group = %group_name, "state of unknown group");
					continue;
				};
				let value = control_value(&group.kind, values.to_vec(), region.value.clone());
				items.extend(control(
					&group.kind,
					ControlResult {
						id: Some(region.id.clone()),
						from_name: group_name.clone(),
						to_name: to_name.clone(),
						value,
					},
				));
			}
		}

		items.extend(self.relations().iter().map(|r| {
			ResultItem::Relation(RelationResult {
				from_id: r.from.clone(),
				to_id: r.to.clone(),
			})
		}));
		items
	}

	/// Loads serialized results into this completion as one transaction.
	///
	/// Items naming unknown groups, objects or regions are skipped with a
	/// warning.
	pub fn deserialize(&mut self, items: &[ResultItem]) {
		self.edit("deserialize", |scope| {
			for item in items {
				match item {
					ResultItem::Choices(control) | ResultItem::Labels(control) => {
						load_control(scope, control);
					}
					ResultItem::Relation(relation) => {
						let regions = &scope.state().regions;
						if !regions.contains(&relation.from_id) || !regions.contains(&relation.to_id) {
							warn!(from = %relation.from_id, to = %relation.to_id, "relation between unknown regions");
							continue;
						}
						scope.insert_relation(Relation::new(
							relation.from_id.clone(),
							relation.to_id.clone(),
						));
					}
				}
			}
		});
	}
}

fn load_control(scope: &mut EditScope<'_>, control: &ControlResult) {
	let tree = &scope.state().tree;
	let Some(group) = tree.by_name(&control.from_name).filter(|&id| tree.group(id).is_some()) else {
		warn!(from_name = %control.from_name, "result for unknown group");
		return;
	};
	let values = control.value.values();

	if control.value.region.is_empty() {
		let mut selected: Vec<NodeId> = tree
			.tied_children(group)
			.iter()
			.copied()
			.filter(|&id| values.iter().any(|v| v == tree.node(id).result_value()))
			.collect();
		let single = tree
			.group(group)
			.is_some_and(|g| g.mode == ChoiceMode::Single);
		if single {
			if selected.len() > 1 {
				warn!(group = %control.from_name, values = selected.len(), "single choice result holds several values; keeping the first");
			}
			selected.truncate(1);
			unselect_all(scope, group);
		}
		for id in selected {
			scope.set_selected(id, true);
		}
		return;
	}

	let Some(owner) = tree.by_name(&control.to_name) else {
		warn!(to_name = %control.to_name, "result for unknown object");
		return;
	};
	let id = match &control.id {
		Some(id) => id.clone(),
		None => Region::new(owner, Map::new()).id,
	};
	if !scope.state().regions.contains(&id) {
		scope.insert_region(Region::with_id(id.clone(), owner, control.value.region.clone()));
	}
	let values: Values = values.iter().cloned().collect();
	scope.set_region_state(&id, &control.from_name, Some(values));
}
