use annotix_primitives::{NodeId, RegionId};
use tracing::debug;

use crate::completion::AnnotationState;
use crate::regions::{Region, Relation, Values};

/// One reversible change to an [`AnnotationState`].
///
/// Every variant carries both sides of the change, so an edit can be applied
/// and inverted without consulting the state it was recorded against.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
	Selected {
		node: NodeId,
		before: bool,
		after: bool,
	},
	Visible {
		node: NodeId,
		before: bool,
		after: bool,
	},
	Query {
		node: NodeId,
		before: String,
		after: String,
	},
	RegionInserted {
		index: usize,
		region: Region,
	},
	RegionRemoved {
		index: usize,
		region: Region,
	},
	RegionState {
		region: RegionId,
		group: String,
		before: Option<Values>,
		after: Option<Values>,
	},
	RegionHidden {
		region: RegionId,
		before: bool,
		after: bool,
	},
	RelationInserted {
		index: usize,
		relation: Relation,
	},
	RelationRemoved {
		index: usize,
		relation: Relation,
	},
}

impl Edit {
	/// Whether applying the edit leaves the state unchanged.
	pub fn is_noop(&self) -> bool {
		match self {
			Self::Selected { before, after, .. }
			| Self::Visible { before, after, .. }
			| Self::RegionHidden { before, after, .. } => before == after,
			Self::Query { before, after, .. } => before == after,
			Self::RegionState { before, after, .. } => before == after,
			Self::RegionInserted { .. }
			| Self::RegionRemoved { .. }
			| Self::RelationInserted { .. }
			| Self::RelationRemoved { .. } => false,
		}
	}

	/// The edit that undoes this one.
	pub fn invert(&self) -> Edit {
		match self.clone() {
			Self::Selected { node, before, after } => Self::Selected {
				node,
				before: after,
				after: before,
			},
			Self::Visible { node, before, after } => Self::Visible {
				node,
				before: after,
				after: before,
			},
			Self::Query { node, before, after } => Self::Query {
				node,
				before: after,
				after: before,
			},
			Self::RegionInserted { index, region } => Self::RegionRemoved { index, region },
			Self::RegionRemoved { index, region } => Self::RegionInserted { index, region },
			Self::RegionState {
				region,
				group,
				before,
				after,
			} => Self::RegionState {
				region,
				group,
				before: after,
				after: before,
			},
			Self::RegionHidden {
				region,
				before,
				after,
			} => Self::RegionHidden {
				region,
				before: after,
				after: before,
			},
			Self::RelationInserted { index, relation } => Self::RelationRemoved { index, relation },
			Self::RelationRemoved { index, relation } => Self::RelationInserted { index, relation },
		}
	}

	/// Writes the `after` side of the edit into `state`.
	pub fn apply(&self, state: &mut AnnotationState) {
		match self {
			Self::Selected { node, after, .. } => {
				match state.tree.get_mut(*node).and_then(|n| n.kind.as_selectable_mut()) {
					Some(sel) => sel.selected = *after,
					None => debug!(node = %node, "selection edit on a non-option"),
				}
			}
			Self::Visible { node, after, .. } => match state.tree.get_mut(*node) {
				Some(n) => n.visible = *after,
				None => debug!(node = %node, "visibility edit on a missing node"),
			},
			Self::Query { node, after, .. } => {
				match state.tree.get_mut(*node).and_then(|n| n.kind.as_filter_mut()) {
					Some(filter) => filter.query.clone_from(after),
					None => debug!(node = %node, "query edit on a non-filter"),
				}
			}
			Self::RegionInserted { index, region } => state.regions.insert(*index, region.clone()),
			Self::RegionRemoved { index, region } => {
				if state.regions.remove(*index).is_none() {
					debug!(region = %region.id, index, "region already removed");
				}
			}
			Self::RegionState {
				region,
				group,
				after,
				..
			} => match state.regions.get_mut(region) {
				Some(r) => match after {
					Some(values) => {
						r.states.insert(group.clone(), values.clone());
					}
					None => {
						r.states.remove(group);
					}
				},
				None => debug!(region = %region, "state edit on a missing region"),
			},
			Self::RegionHidden { region, after, .. } => match state.regions.get_mut(region) {
				Some(r) => r.hidden = *after,
				None => debug!(region = %region, "hidden edit on a missing region"),
			},
			Self::RelationInserted { index, relation } => {
				state.relations.insert(*index, relation.clone());
			}
			Self::RelationRemoved { index, relation } => {
				if state.relations.remove(*index).is_none() {
					debug!(from = %relation.from, to = %relation.to, "relation already removed");
				}
			}
		}
	}
}

/// The edits of one user-level operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
	pub label: &'static str,
	pub edits: Vec<Edit>,
}

impl Transaction {
	pub fn apply(&self, state: &mut AnnotationState) {
		for edit in &self.edits {
			edit.apply(state);
		}
	}

	/// Undoes the transaction: inverse edits in reverse order.
	pub fn revert(&self, state: &mut AnnotationState) {
		for edit in self.edits.iter().rev() {
			edit.invert().apply(state);
		}
	}
}

/// Records edits while applying them to a state.
///
/// Handed to the closure of [`Completion::edit`]. Each setter reads the
/// current value, skips the change if nothing would differ, and otherwise
/// applies it immediately so later reads observe it.
///
/// [`Completion::edit`]: crate::Completion::edit
pub struct EditScope<'a> {
	state: &'a mut AnnotationState,
	edits: Vec<Edit>,
}

impl<'a> EditScope<'a> {
	pub(crate) fn new(state: &'a mut AnnotationState) -> Self {
		Self {
			state,
			edits: Vec::new(),
		}
	}

	pub(crate) fn finish(self) -> Vec<Edit> {
		self.edits
	}

	pub fn state(&self) -> &AnnotationState {
		self.state
	}

	/// Applies and records `edit` unless it changes nothing.
	pub fn push(&mut self, edit: Edit) {
		if edit.is_noop() {
			return;
		}
		edit.apply(self.state);
		self.edits.push(edit);
	}

	pub fn set_selected(&mut self, node: NodeId, selected: bool) {
		let Some(before) = self
			.state
			.tree
			.get(node)
			.and_then(|n| n.kind.as_selectable())
			.map(|s| s.selected)
		else {
			return;
		};
		self.push(Edit::Selected {
			node,
			before,
			after: selected,
		});
	}

	pub fn set_visible(&mut self, node: NodeId, visible: bool) {
		let Some(before) = self.state.tree.get(node).map(|n| n.visible) else {
			return;
		};
		self.push(Edit::Visible {
			node,
			before,
			after: visible,
		});
	}

	pub fn set_query(&mut self, node: NodeId, query: &str) {
		let Some(before) = self
			.state
			.tree
			.get(node)
			.and_then(|n| n.kind.as_filter())
			.map(|f| f.query.clone())
		else {
			return;
		};
		self.push(Edit::Query {
			node,
			before,
			after: query.to_owned(),
		});
	}

	pub fn insert_region(&mut self, region: Region) {
		let index = self.state.regions.len();
		self.push(Edit::RegionInserted { index, region });
	}

	/// Removes a region and every relation touching it.
	pub fn remove_region(&mut self, id: &RegionId) {
		while let Some(index) = self.state.relations.iter().rposition(|r| r.involves(id)) {
			self.remove_relation_at(index);
		}
		let Some(index) = self.state.regions.position(id) else {
			return;
		};
		let region = self.state.regions.iter().nth(index).cloned();
		if let Some(region) = region {
			self.push(Edit::RegionRemoved { index, region });
		}
	}

	pub fn set_region_state(&mut self, id: &RegionId, group: &str, values: Option<Values>) {
		let Some(region) = self.state.regions.get(id) else {
			return;
		};
		let before = region.states.get(group).cloned();
		self.push(Edit::RegionState {
			region: id.clone(),
			group: group.to_owned(),
			before,
			after: values,
		});
	}

	pub fn set_region_hidden(&mut self, id: &RegionId, hidden: bool) {
		let Some(before) = self.state.regions.get(id).map(|r| r.hidden) else {
			return;
		};
		self.push(Edit::RegionHidden {
			region: id.clone(),
			before,
			after: hidden,
		});
	}

	/// Adds a relation unless the pair already exists.
	pub fn insert_relation(&mut self, relation: Relation) -> bool {
		if self.state.relations.contains(&relation.from, &relation.to) {
			return false;
		}
		let index = self.state.relations.len();
		self.push(Edit::RelationInserted { index, relation });
		true
	}

	pub fn remove_relation(&mut self, from: &RegionId, to: &RegionId) -> bool {
		match self.state.relations.position(from, to) {
			Some(index) => {
				self.remove_relation_at(index);
				true
			}
			None => false,
		}
	}

	fn remove_relation_at(&mut self, index: usize) {
		let relation = self.state.relations.iter().nth(index).cloned();
		if let Some(relation) = relation {
			self.push(Edit::RelationRemoved { index, relation });
		}
	}
}
