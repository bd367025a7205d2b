//! Arena tag tree.
//!
//! Nodes are stored in pre-order; a [`NodeId`] is an index into the arena and
//! parent links are plain ids. Trees built from the same configuration assign
//! the same ids, so ids may be shared across completions.

mod builder;
#[cfg(test)]
mod tests;

use annotix_keymap_parser::Node;
use annotix_primitives::NodeId;
use rustc_hash::FxHashMap;

pub use builder::TreeBuilder;

use crate::regions::Values;
use crate::tags::{SelectGroup, TagNode};

/// A by-name reference that did not resolve in a lenient build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
	pub node: NodeId,
	pub attribute: &'static str,
	pub target: String,
}

/// Tag tree of one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct TagTree {
	nodes: Vec<TagNode>,
	names: FxHashMap<String, NodeId>,
	unresolved: Vec<UnresolvedReference>,
}

impl TagTree {
	fn empty() -> Self {
		Self {
			nodes: Vec::new(),
			names: FxHashMap::default(),
			unresolved: Vec::new(),
		}
	}

	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: NodeId) -> Option<&TagNode> {
		self.nodes.get(id.index())
	}

	/// Returns the node for an id taken from this tree.
	///
	/// # Panics
	///
	/// Panics if `id` does not belong to this tree.
	pub fn node(&self, id: NodeId) -> &TagNode {
		&self.nodes[id.index()]
	}

	pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut TagNode> {
		self.nodes.get_mut(id.index())
	}

	/// Looks up a node by its `name` attribute.
	pub fn by_name(&self, name: &str) -> Option<NodeId> {
		self.names.get(name).copied()
	}

	/// Looks up a node by name and returns it.
	pub fn named(&self, name: &str) -> Option<&TagNode> {
		self.by_name(name).and_then(|id| self.get(id))
	}

	/// The name index.
	pub fn names(&self) -> &FxHashMap<String, NodeId> {
		&self.names
	}

	/// References skipped by a lenient build.
	pub fn unresolved(&self) -> &[UnresolvedReference] {
		&self.unresolved
	}

	/// All nodes in pre-order.
	pub fn iter(&self) -> impl Iterator<Item = &TagNode> + '_ {
		self.nodes.iter()
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.get(id)?.parent
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.get(id).map_or(&[], |n| n.children.as_slice())
	}

	/// Proper ancestors of `id`, nearest first.
	pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		std::iter::successors(self.parent(id), move |&p| self.parent(p))
	}

	/// Proper descendants of `id` in pre-order.
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
		while let Some(next) = stack.pop() {
			out.push(next);
			stack.extend(self.children(next).iter().rev());
		}
		out
	}

	/// The group state of a `<Choices>`/`<Labels>` node.
	pub fn group(&self, id: NodeId) -> Option<&SelectGroup> {
		self.get(id)?.kind.as_group()
	}

	/// Options of a group in pre-order; empty for anything else.
	pub fn tied_children(&self, group: NodeId) -> &[NodeId] {
		self.group(group).map_or(&[], |g| g.tied.as_slice())
	}

	/// Group an option belongs to.
	pub fn group_of(&self, option: NodeId) -> Option<NodeId> {
		self.get(option)?.kind.as_selectable()?.group
	}

	/// Resolved values of the selected options of `group`, in tree order.
	pub fn selected_values(&self, group: NodeId) -> Values {
		self.tied_children(group)
			.iter()
			.map(|&id| self.node(id))
			.filter(|n| n.is_selected())
			.map(|n| n.result_value().to_owned())
			.collect()
	}

	/// Nodes carrying an enabled hotkey.
	pub fn hotkeys(&self) -> impl Iterator<Item = (NodeId, Node)> + '_ {
		self.nodes
			.iter()
			.filter_map(|n| n.active_hotkey().map(|key| (n.id, key)))
	}
}
