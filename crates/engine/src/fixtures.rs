//! Configurations shared by the unit tests.

use serde_json::json;

use crate::config::ConfigNode;
use crate::registry::builtin_registry;
use crate::task::Task;
use crate::tree::{TagTree, TreeBuilder};

pub fn choice(value: &str) -> ConfigNode {
	ConfigNode::new("Choice").attr("value", value)
}

pub fn label(value: &str) -> ConfigNode {
	ConfigNode::new("Label").attr("value", value)
}

/// Text classification with a quick filter over three fruits.
pub fn fruits(mode: &str) -> ConfigNode {
	ConfigNode::new("View").children([
		ConfigNode::new("Text").attr("name", "text").attr("value", "$text"),
		ConfigNode::new("Filter")
			.attr("name", "filter")
			.attr("toName", "fruit")
			.attr("hotkey", "shift+f"),
		ConfigNode::new("Choices")
			.attr("name", "fruit")
			.attr("toName", "text")
			.attr("choice", mode)
			.children([
				choice("Apple").attr("hotkey", "1"),
				choice("Banana").attr("hotkey", "2"),
				choice("apple pie"),
			]),
	])
}

/// Span labeling with a per-region classification.
pub fn spans() -> ConfigNode {
	ConfigNode::new("View").children([
		ConfigNode::new("Labels")
			.attr("name", "label")
			.attr("toName", "text")
			.children([label("PER"), label("ORG")]),
		ConfigNode::new("Text").attr("name", "text").attr("value", "$text"),
		ConfigNode::new("Choices")
			.attr("name", "sentiment")
			.attr("toName", "text")
			.attr("perRegion", "true")
			.attr("choice", "multiple")
			.children([choice("Positive"), choice("Negative")]),
	])
}

pub fn task() -> Task {
	Task::new(Some(1), json!({ "text": "Ann eats an apple" }))
}

pub fn build(config: &ConfigNode) -> TagTree {
	let task = task();
	TreeBuilder::new(&builtin_registry())
		.with_task(Some(&task))
		.build(config)
		.unwrap()
}
