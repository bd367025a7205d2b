use annotix_primitives::{NodeId, RegionId};
use tracing::{debug, trace};

use super::{Completion, Focus};
use crate::history::EditScope;
use crate::tags::TagKind;

impl Completion {
	/// Flips the selection of an option.
	///
	/// In single mode the siblings are cleared first, so a selected radio stays
	/// selected. When a region is highlighted and the option's group is
	/// per-region for the region's object, the group's values are written to
	/// the region as well.
	pub fn toggle_selected(&mut self, node: NodeId) {
		let highlighted = self.highlighted.clone();
		self.edit("toggle", |scope| toggle(scope, node, highlighted.as_ref()));
	}

	/// Clears every option of `group`.
	pub fn unselect_all(&mut self, group: NodeId) {
		self.edit("unselect-all", |scope| unselect_all(scope, group));
	}

	/// Selects the first visible option of `group` and returns it. An option
	/// that is already selected stays selected.
	pub fn select_first_visible(&mut self, group: NodeId) -> Option<NodeId> {
		let highlighted = self.highlighted.clone();
		self.edit("select-first", |scope| {
			select_first_visible(scope, group, highlighted.as_ref())
		})
	}

	/// Runs the hotkey action of a tag. Returns whether anything happened.
	pub fn on_hot_key(&mut self, node: NodeId) -> bool {
		let Some(tag) = self.state.tree.get(node) else {
			return false;
		};
		if tag.kind.as_filter().is_some() {
			self.focus = Focus::Filter(node);
			return true;
		}
		if tag.kind.as_selectable().is_none() {
			return false;
		}
		if tag.disable_hotkey {
			trace!(node = %node, "hotkey disabled");
			return false;
		}
		self.toggle_selected(node);
		true
	}
}

pub(crate) fn toggle(scope: &mut EditScope<'_>, node: NodeId, highlighted: Option<&RegionId>) {
	let tree = &scope.state().tree;
	let Some((group, mode)) = tree
		.group_of(node)
		.and_then(|g| tree.group(g).map(|settings| (g, settings.mode)))
	else {
		debug!(node = %node, "toggle on a node outside any group");
		return;
	};

	if mode.should_be_unselected() {
		unselect_all(scope, group);
	}
	let selected = scope.state().tree.node(node).is_selected();
	scope.set_selected(node, !selected);

	if let Some(region) = highlighted {
		update_or_add_state(scope, group, region);
	}
}

pub(crate) fn unselect_all(scope: &mut EditScope<'_>, group: NodeId) {
	let tied = scope.state().tree.tied_children(group).to_vec();
	for id in tied {
		scope.set_selected(id, false);
	}
}

pub(crate) fn select_first_visible(
	scope: &mut EditScope<'_>,
	group: NodeId,
	highlighted: Option<&RegionId>,
) -> Option<NodeId> {
	let tree = &scope.state().tree;
	let first = tree
		.tied_children(group)
		.iter()
		.copied()
		.find(|&id| tree.node(id).visible)?;
	if !tree.node(first).is_selected() {
		toggle(scope, first, highlighted);
	}
	Some(first)
}

/// Copies the selected values of a per-region group onto `region`.
///
/// `<Labels>` groups always label regions. Applies only when the group
/// annotates the region's object; an empty selection removes the state.
pub(crate) fn update_or_add_state(scope: &mut EditScope<'_>, group: NodeId, region: &RegionId) {
	let state = scope.state();
	let Some(node) = state.tree.get(group) else {
		return;
	};
	let Some(settings) = node.kind.as_group() else {
		return;
	};
	if !settings.per_region && !matches!(node.kind, TagKind::Labels(_)) {
		return;
	}
	let Some(name) = node.name.clone() else {
		debug!(group = %group, "per-region group without a name");
		return;
	};
	let Some(owner) = state.regions.get(region).map(|r| r.owner) else {
		return;
	};
	let owner_name = state.tree.get(owner).and_then(|n| n.name.as_deref());
	if owner_name.is_none() || owner_name != settings.to_name.as_deref() {
		return;
	}

	let values = state.tree.selected_values(group);
	let values = (!values.is_empty()).then_some(values);
	scope.set_region_state(region, &name, values);
}
