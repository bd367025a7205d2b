use annotix_primitives::NodeId;
use annotix_registry::RegistryError;
use pretty_assertions::assert_eq;

use super::*;
use crate::config::ConfigNode;
use crate::error::{AttrError, BuildError};
use crate::fixtures::{build, choice, fruits, spans};
use crate::registry::builtin_registry;
use crate::tags::{ChoiceMode, TagKind};

fn try_build(config: &ConfigNode) -> Result<TagTree, BuildError> {
	TreeBuilder::new(&builtin_registry()).build(config)
}

#[test]
fn preserves_configuration_order() {
	let tree = build(&fruits("single"));
	let types: Vec<_> = tree.iter().map(|n| n.tag_name.as_str()).collect();
	assert_eq!(
		types,
		["view", "text", "filter", "choices", "choice", "choice", "choice"]
	);

	let fruit = tree.by_name("fruit").unwrap();
	let values: Vec<_> = tree
		.children(fruit)
		.iter()
		.map(|&id| tree.node(id).resolved.as_str())
		.collect();
	assert_eq!(values, ["Apple", "Banana", "apple pie"]);
	assert_eq!(tree.tied_children(fruit), tree.children(fruit));
	for &child in tree.children(fruit) {
		assert_eq!(tree.parent(child), Some(fruit));
	}
}

#[test]
fn resolves_references_and_task_values() {
	let tree = build(&fruits("multiple"));
	let text = tree.by_name("text").unwrap();
	let fruit = tree.by_name("fruit").unwrap();
	let filter = tree.by_name("filter").unwrap();

	assert_eq!(tree.node(text).resolved, "Ann eats an apple");
	let group = tree.group(fruit).unwrap();
	assert_eq!(group.target, Some(text));
	assert_eq!(group.mode, ChoiceMode::Multiple);
	assert_eq!(tree.node(filter).kind.as_filter().unwrap().target, Some(fruit));
	assert!(tree.unresolved().is_empty());
}

#[test]
fn parses_hotkeys() {
	let tree = build(&fruits("single"));
	let keys: Vec<_> = tree.hotkeys().map(|(_, key)| key.to_string()).collect();
	assert_eq!(keys, ["shift+f", "1", "2"]);
}

#[test]
fn disabled_hotkeys_are_not_active() {
	let config = ConfigNode::new("Choices").attr("name", "c").child(
		choice("A")
			.attr("hotkey", "a")
			.attr("disableHotkey", "true"),
	);
	let tree = try_build(&config).unwrap();
	assert_eq!(tree.hotkeys().count(), 0);
	assert!(tree.node(NodeId(1)).hotkey.is_some());
}

#[test]
fn unknown_tag_aborts_the_build() {
	let config = ConfigNode::new("View").child(ConfigNode::new("Rating"));
	assert_eq!(
		try_build(&config),
		Err(BuildError::Registry(RegistryError::UnknownTag {
			tag: "rating".into()
		}))
	);
}

#[test]
fn unresolved_reference_is_an_error_by_default() {
	let config = ConfigNode::new("Choices")
		.attr("name", "c")
		.attr("toName", "nowhere")
		.child(choice("A"));
	let err = try_build(&config).unwrap_err();
	assert!(matches!(
		err,
		BuildError::UnresolvedReference { ref target, .. } if target == "nowhere"
	));
}

#[test]
fn lenient_build_records_unresolved_references() {
	let config = ConfigNode::new("View").children([
		ConfigNode::new("Filter").attr("toName", "missing"),
		ConfigNode::new("Choices").attr("name", "c").child(choice("A")),
	]);
	let tree = TreeBuilder::new(&builtin_registry())
		.lenient(true)
		.build(&config)
		.unwrap();

	assert_eq!(
		tree.unresolved(),
		[UnresolvedReference {
			node: NodeId(1),
			attribute: "toname",
			target: "missing".into(),
		}]
	);
	assert_eq!(tree.node(NodeId(1)).kind.as_filter().unwrap().target, None);
}

#[test]
fn duplicate_names_are_rejected() {
	let config = ConfigNode::new("View").children([
		ConfigNode::new("Text").attr("name", "text"),
		ConfigNode::new("Text").attr("name", "text"),
	]);
	assert_eq!(
		try_build(&config),
		Err(BuildError::DuplicateName {
			name: "text".into()
		})
	);
}

#[test]
fn options_need_a_matching_group() {
	let config = ConfigNode::new("Labels")
		.attr("name", "l")
		.child(choice("A"));
	assert!(matches!(
		try_build(&config),
		Err(BuildError::Orphan {
			expected: "choices",
			..
		})
	));
}

#[test]
fn nested_groups_tie_their_own_options() {
	let config = ConfigNode::new("Choices").attr("name", "outer").children([
		choice("A"),
		ConfigNode::new("View").child(
			ConfigNode::new("Choices")
				.attr("name", "inner")
				.child(choice("B")),
		),
		choice("C"),
	]);
	let tree = try_build(&config).unwrap();
	let outer = tree.by_name("outer").unwrap();
	let inner = tree.by_name("inner").unwrap();
	let values = |group: NodeId| -> Vec<&str> {
		tree.tied_children(group)
			.iter()
			.map(|&id| tree.node(id).resolved.as_str())
			.collect()
	};
	assert_eq!(values(outer), ["A", "C"]);
	assert_eq!(values(inner), ["B"]);
}

#[test]
fn invalid_attributes_name_the_tag() {
	let config = ConfigNode::new("Filter").attr("minLength", "many");
	assert_eq!(
		try_build(&config),
		Err(BuildError::Attribute {
			tag: "filter".into(),
			source: AttrError::InvalidNumber {
				attr: "minlength".into(),
				value: "many".into(),
			},
		})
	);

	let config = ConfigNode::new("Choices").attr("choice", "several");
	assert!(matches!(
		try_build(&config),
		Err(BuildError::Attribute {
			source: AttrError::InvalidValue { .. },
			..
		})
	));
}

#[test]
fn invalid_hotkeys_are_rejected() {
	let config = ConfigNode::new("Choices").child(choice("A").attr("hotkey", "ctrl+"));
	assert!(matches!(try_build(&config), Err(BuildError::Hotkey { .. })));
}

#[test]
fn labels_link_to_label_groups() {
	let tree = build(&spans());
	let labels = tree.by_name("label").unwrap();
	assert!(matches!(tree.node(labels).kind, TagKind::Labels(_)));
	for &id in tree.tied_children(labels) {
		assert!(matches!(tree.node(id).kind, TagKind::Label(_)));
		assert_eq!(tree.group_of(id), Some(labels));
	}
	assert_eq!(tree.tied_children(labels).len(), 2);
}
