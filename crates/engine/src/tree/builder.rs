use annotix_keymap_parser::parse;
use annotix_primitives::NodeId;
use annotix_registry::TagRegistry;
use tracing::{debug, warn};

use super::{TagTree, UnresolvedReference};
use crate::config::ConfigNode;
use crate::error::BuildError;
use crate::registry::TagEntry;
use crate::tags::{Attrs, Choices, Labels, TagKind, TagModel, TagNode};
use crate::task::Task;

/// Builds a [`TagTree`] from a configuration.
///
/// Construction runs depth-first in pre-order. A second pass then links
/// options to their groups, resolves `toname` references and computes each
/// group's tied options.
pub struct TreeBuilder<'a> {
	registry: &'a TagRegistry<TagEntry>,
	task: Option<&'a Task>,
	lenient: bool,
}

impl<'a> TreeBuilder<'a> {
	pub fn new(registry: &'a TagRegistry<TagEntry>) -> Self {
		Self {
			registry,
			task: None,
			lenient: false,
		}
	}

	/// Resolves `$key` values against `task`.
	pub fn with_task(mut self, task: Option<&'a Task>) -> Self {
		self.task = task;
		self
	}

	/// Keeps nodes whose `toname` does not resolve instead of failing.
	///
	/// Their target stays `None` and the failure is listed in
	/// [`TagTree::unresolved`].
	pub fn lenient(mut self, lenient: bool) -> Self {
		self.lenient = lenient;
		self
	}

	/// Builds the tree.
	///
	/// # Errors
	///
	/// Fails on unknown tag types, invalid attributes or hotkeys, duplicate
	/// names, options outside a group and, unless lenient, unresolved
	/// references. No partial tree is returned.
	pub fn build(&self, config: &ConfigNode) -> Result<TagTree, BuildError> {
		let mut tree = TagTree::empty();
		self.construct(&mut tree, config, None)?;
		link_groups(&mut tree)?;
		self.resolve_references(&mut tree)?;
		debug!(nodes = tree.len(), names = tree.names.len(), "tag tree built");
		Ok(tree)
	}

	fn construct(
		&self,
		tree: &mut TagTree,
		config: &ConfigNode,
		parent: Option<NodeId>,
	) -> Result<NodeId, BuildError> {
		let entry = self.registry.resolve(&config.tag_name)?;
		let attrs = Attrs::new(&config.attributes);
		let tag = entry.tag_type;

		let kind = (entry.construct)(&attrs).map_err(|source| BuildError::Attribute {
			tag: tag.to_owned(),
			source,
		})?;
		let hotkey = match attrs.get("hotkey") {
			Some(combo) if !combo.trim().is_empty() => {
				Some(parse(combo).map_err(|source| BuildError::Hotkey {
					tag: tag.to_owned(),
					combo: combo.to_owned(),
					source,
				})?)
			}
			_ => None,
		};
		let disable_hotkey = attrs
			.bool("disablehotkey", false)
			.map_err(|source| BuildError::Attribute {
				tag: tag.to_owned(),
				source,
			})?;

		let value = attrs.string("value");
		let resolved = value.as_deref().map_or_else(String::new, |v| self.resolve_value(v));

		let id = NodeId(tree.nodes.len() as u32);
		let name = attrs.string("name");
		if let Some(name) = &name {
			if tree.names.insert(name.clone(), id).is_some() {
				return Err(BuildError::DuplicateName { name: name.clone() });
			}
		}

		tree.nodes.push(TagNode {
			id,
			tag_name: tag.to_owned(),
			name,
			visible: true,
			value,
			resolved,
			hotkey,
			disable_hotkey,
			parent,
			children: Vec::new(),
			kind,
		});
		if let Some(parent) = parent {
			tree.nodes[parent.index()].children.push(id);
		}

		for child in &config.children {
			self.construct(tree, child, Some(id))?;
		}
		Ok(id)
	}

	fn resolve_value(&self, value: &str) -> String {
		if !value.starts_with('$') {
			return value.to_owned();
		}
		match self.task.and_then(|task| task.resolve(value)) {
			Some(resolved) => resolved,
			None => {
				debug!(value, "task field missing, value left empty");
				String::new()
			}
		}
	}

	fn resolve_references(&self, tree: &mut TagTree) -> Result<(), BuildError> {
		for index in 0..tree.nodes.len() {
			let node = &tree.nodes[index];
			let to_name = match &node.kind {
				TagKind::Choices(g) | TagKind::Labels(g) => g.to_name.clone(),
				TagKind::Filter(f) => f.to_name.clone(),
				_ => None,
			};
			let Some(to_name) = to_name else {
				continue;
			};

			let target = tree.by_name(&to_name);
			if target.is_none() {
				let node = &tree.nodes[index];
				if !self.lenient {
					return Err(BuildError::UnresolvedReference {
						tag: node.tag_name.clone(),
						node: node.id,
						attribute: "toname",
						target: to_name,
					});
				}
				warn!(node = %node.id, tag = %node.tag_name, target = %to_name, "unresolved toname");
				tree.unresolved.push(UnresolvedReference {
					node: node.id,
					attribute: "toname",
					target: to_name,
				});
				continue;
			}

			match &mut tree.nodes[index].kind {
				TagKind::Choices(g) | TagKind::Labels(g) => g.target = target,
				TagKind::Filter(f) => f.target = target,
				_ => {}
			}
		}
		Ok(())
	}
}

/// Links every option to its nearest group of the matching kind and fills in
/// each group's tied options.
fn link_groups(tree: &mut TagTree) -> Result<(), BuildError> {
	for index in 0..tree.nodes.len() {
		let id = NodeId(index as u32);
		let kind = &tree.nodes[index].kind;
		if kind.as_selectable().is_none() {
			continue;
		}
		let group = tree
			.ancestors(id)
			.find(|&a| kind.belongs_to(&tree.node(a).kind));
		let Some(group) = group else {
			let expected = match kind {
				TagKind::Label(_) => Labels::TYPE,
				_ => Choices::TYPE,
			};
			return Err(BuildError::Orphan {
				tag: tree.nodes[index].tag_name.clone(),
				node: id,
				expected,
			});
		};
		if let Some(sel) = tree.nodes[index].kind.as_selectable_mut() {
			sel.group = Some(group);
		}
	}

	for index in 0..tree.nodes.len() {
		let id = NodeId(index as u32);
		if tree.nodes[index].kind.as_group().is_none() {
			continue;
		}
		let tied: Vec<NodeId> = tree
			.descendants(id)
			.into_iter()
			.filter(|&d| tree.group_of(d) == Some(id))
			.collect();
		if let Some(group) = tree.nodes[index].kind.as_group_mut() {
			group.tied = tied;
		}
	}
	Ok(())
}
