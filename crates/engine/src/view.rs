//! Render contract.
//!
//! Each registered tag type carries a view function turning a node into a
//! [`Widget`]. Hosts walk the widget tree to draw the interface; the engine
//! never draws anything itself.

use annotix_registry::TagRegistry;
use serde::Serialize;

use crate::completion::{Completion, Focus};
use crate::registry::TagEntry;
use crate::settings::Settings;
use crate::tags::{ChoiceMode, TagKind, TagNode, document_source};
use crate::task::Task;

/// Renders one node.
pub type ViewFn = fn(&RenderContext<'_>, &TagNode) -> Widget;

/// Everything a view function may read.
pub struct RenderContext<'a> {
	pub completion: &'a Completion,
	pub settings: &'a Settings,
	pub task: Option<&'a Task>,
	pub registry: &'a TagRegistry<TagEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
	Container {
		children: Vec<Widget>,
	},
	Text {
		name: Option<String>,
		value: String,
	},
	Checkbox {
		label: String,
		checked: bool,
		disabled: bool,
		hidden: bool,
		hint: Option<String>,
	},
	Radio {
		label: String,
		checked: bool,
		disabled: bool,
		hidden: bool,
		hint: Option<String>,
	},
	Chip {
		label: String,
		selected: bool,
		hidden: bool,
		hint: Option<String>,
	},
	Input {
		class: String,
		placeholder: String,
		value: String,
		focused: bool,
	},
	Document {
		src: Option<String>,
	},
	Empty,
}

impl RenderContext<'_> {
	/// Renders the whole tree of the completion.
	pub fn render(&self) -> Widget {
		let tree = self.completion.tree();
		match tree.get(tree.root()) {
			Some(root) => self.render_node(root),
			None => Widget::Empty,
		}
	}

	pub fn render_node(&self, node: &TagNode) -> Widget {
		match self.registry.get(&node.tag_name) {
			Some(entry) => (entry.view)(self, node),
			None => Widget::Empty,
		}
	}

	pub fn render_children(&self, node: &TagNode) -> Vec<Widget> {
		let tree = self.completion.tree();
		node.children
			.iter()
			.filter_map(|&id| tree.get(id))
			.map(|child| self.render_node(child))
			.collect()
	}

	fn hint(&self, node: &TagNode, tooltips: bool) -> Option<String> {
		if !tooltips || !self.settings.enable_hotkeys {
			return None;
		}
		node.active_hotkey().map(|key| key.to_string())
	}
}

pub fn view_container(ctx: &RenderContext<'_>, node: &TagNode) -> Widget {
	Widget::Container {
		children: ctx.render_children(node),
	}
}

pub fn view_text(_ctx: &RenderContext<'_>, node: &TagNode) -> Widget {
	Widget::Text {
		name: node.name.clone(),
		value: node.resolved.clone(),
	}
}

/// Radio, checkbox or chip depending on the group mode.
pub fn view_choice(ctx: &RenderContext<'_>, node: &TagNode) -> Widget {
	let tree = ctx.completion.tree();
	let Some(group) = tree.group_of(node.id).and_then(|g| tree.group(g)) else {
		return Widget::Empty;
	};
	let label = node.resolved.clone();
	let checked = node.is_selected();
	let disabled = group.readonly || !ctx.completion.editable();
	let hidden = !node.visible;
	match group.mode {
		ChoiceMode::Single => Widget::Radio {
			label,
			checked,
			disabled,
			hidden,
			hint: ctx.hint(node, ctx.settings.enable_tooltips || ctx.settings.enable_label_tooltips),
		},
		ChoiceMode::Multiple => Widget::Checkbox {
			label,
			checked,
			disabled,
			hidden,
			hint: ctx.hint(node, ctx.settings.enable_tooltips),
		},
		ChoiceMode::Label => Widget::Chip {
			label,
			selected: checked,
			hidden,
			hint: ctx.hint(node, ctx.settings.enable_tooltips || ctx.settings.enable_label_tooltips),
		},
	}
}

pub fn view_label(ctx: &RenderContext<'_>, node: &TagNode) -> Widget {
	Widget::Chip {
		label: node.resolved.clone(),
		selected: node.is_selected(),
		hidden: !node.visible,
		hint: ctx.hint(node, ctx.settings.enable_tooltips || ctx.settings.enable_label_tooltips),
	}
}

/// A text input, shown only when the filter targets a group.
pub fn view_filter(ctx: &RenderContext<'_>, node: &TagNode) -> Widget {
	let Some(filter) = node.kind.as_filter() else {
		return Widget::Empty;
	};
	let tree = ctx.completion.tree();
	if filter.target.and_then(|t| tree.group(t)).is_none() {
		return Widget::Empty;
	}
	Widget::Input {
		class: node.name.clone().unwrap_or_default(),
		placeholder: filter.placeholder.clone(),
		value: filter.query.clone(),
		focused: ctx.completion.focus() == &Focus::Filter(node.id),
	}
}

pub fn view_pdf(ctx: &RenderContext<'_>, node: &TagNode) -> Widget {
	if !matches!(node.kind, TagKind::Pdf(_)) {
		return Widget::Empty;
	}
	Widget::Document {
		src: document_source(node, ctx.task),
	}
}
