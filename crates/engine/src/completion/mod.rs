//! Completions: one annotation of a task.
//!
//! A [`Completion`] owns its tag tree, regions and relations (together the
//! [`AnnotationState`]) and the [`History`] over that state. Every mutation
//! runs through [`Completion::edit`], so undo and redo cover all of it.
//! Transient UI state (highlight, relation mode, focus) lives beside the
//! annotation state and is not recorded.

mod regions;
pub(crate) mod selection;
mod validate;

use annotix_primitives::{CompletionId, NodeId, RegionId};
use tracing::debug;

pub use validate::ValidationIssue;

use crate::history::{EditScope, History, Transaction};
use crate::regions::{RegionStore, RelationStore};
use crate::tree::TagTree;

/// Everything undo and redo restore.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationState {
	pub tree: TagTree,
	pub regions: RegionStore,
	pub relations: RelationStore,
}

impl AnnotationState {
	pub fn new(tree: TagTree) -> Self {
		Self {
			tree,
			regions: RegionStore::default(),
			relations: RelationStore::default(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
	/// Made or reviewed by a person.
	Completion,
	/// Produced by a model; read-only.
	Prediction,
}

/// Which input, if any, receives typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
	#[default]
	None,
	/// A `<Filter>` of this completion.
	Filter(NodeId),
	/// An input outside the tag tree, addressed by name.
	Input(String),
}

#[derive(Debug, Clone)]
pub struct Completion {
	id: CompletionId,
	pk: Option<String>,
	kind: CompletionKind,
	state: AnnotationState,
	history: History,
	highlighted: Option<RegionId>,
	relation_mode: bool,
	relation_source: Option<RegionId>,
	focus: Focus,
	editable: bool,
	user_generate: bool,
	sent_user_generate: bool,
}

impl Completion {
	pub fn new(kind: CompletionKind, tree: TagTree) -> Self {
		let focus = tree
			.iter()
			.find(|n| n.kind.as_filter().is_some_and(|f| f.autofocus))
			.map_or(Focus::None, |n| Focus::Filter(n.id));
		let state = AnnotationState::new(tree);
		Self {
			id: CompletionId::next(),
			pk: None,
			kind,
			history: History::new(state.clone()),
			state,
			highlighted: None,
			relation_mode: false,
			relation_source: None,
			focus,
			editable: kind == CompletionKind::Completion,
			user_generate: false,
			sent_user_generate: false,
		}
	}

	pub fn id(&self) -> CompletionId {
		self.id
	}

	/// Server-side key, once the completion has been saved.
	pub fn pk(&self) -> Option<&str> {
		self.pk.as_deref()
	}

	pub fn set_pk(&mut self, pk: Option<String>) {
		self.pk = pk;
	}

	pub fn kind(&self) -> CompletionKind {
		self.kind
	}

	pub fn state(&self) -> &AnnotationState {
		&self.state
	}

	pub fn tree(&self) -> &TagTree {
		&self.state.tree
	}

	pub fn regions(&self) -> &RegionStore {
		&self.state.regions
	}

	pub fn relations(&self) -> &RelationStore {
		&self.state.relations
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn editable(&self) -> bool {
		self.editable
	}

	pub fn set_editable(&mut self, editable: bool) {
		self.editable = editable;
	}

	/// Created locally and not yet sent.
	pub fn user_generate(&self) -> bool {
		self.user_generate
	}

	pub fn sent_user_generate(&self) -> bool {
		self.sent_user_generate
	}

	pub(crate) fn set_user_generate(&mut self, user_generate: bool) {
		self.user_generate = user_generate;
	}

	/// Marks a locally created completion as sent.
	pub fn send_user_generate(&mut self) {
		self.user_generate = false;
		self.sent_user_generate = true;
	}

	pub fn focus(&self) -> &Focus {
		&self.focus
	}

	pub fn set_focus(&mut self, focus: Focus) {
		self.focus = focus;
	}

	pub fn blur(&mut self) {
		self.focus = Focus::None;
	}

	/// Focuses the node or external input called `name`.
	pub fn focus_by_name(&mut self, name: &str) {
		self.focus = match self.state.tree.named(name) {
			Some(node) if node.kind.as_filter().is_some() => Focus::Filter(node.id),
			_ => Focus::Input(name.to_owned()),
		};
	}

	/// Filter that currently has focus.
	pub fn focused_filter(&self) -> Option<NodeId> {
		match self.focus {
			Focus::Filter(id) => Some(id),
			_ => None,
		}
	}

	/// Runs `f` as one history transaction labeled `label`.
	///
	/// Edits are applied as they are made. If any of them changed the state the
	/// transaction is recorded, discarding the redo tail.
	pub fn edit<R>(&mut self, label: &'static str, f: impl FnOnce(&mut EditScope<'_>) -> R) -> R {
		let mut scope = EditScope::new(&mut self.state);
		let out = f(&mut scope);
		let edits = scope.finish();
		if edits.is_empty() {
			debug!(label, "edit changed nothing");
		} else {
			self.history.record(Transaction { label, edits });
		}
		self.sync_transient();
		out
	}

	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	pub fn undo(&mut self) -> bool {
		let undone = self.history.undo(&mut self.state);
		self.sync_transient();
		undone
	}

	pub fn redo(&mut self) -> bool {
		let redone = self.history.redo(&mut self.state);
		self.sync_transient();
		redone
	}

	/// Restores the state the history started from.
	pub fn reset_history(&mut self) {
		self.history.reset(&mut self.state);
		self.sync_transient();
	}

	/// Makes the current state the baseline of an empty history.
	pub fn reinit_history(&mut self) {
		self.history.reinit(&self.state);
	}

	/// Prepares the completion for submission.
	pub fn before_send(&mut self) {
		self.stop_relation_mode();
		self.blur();
	}

	/// Drops transient references to regions that no longer exist.
	fn sync_transient(&mut self) {
		if let Some(id) = &self.highlighted {
			if !self.state.regions.contains(id) {
				debug!(region = %id, "highlighted region gone");
				self.highlighted = None;
			}
		}
		if let Some(id) = &self.relation_source {
			if !self.state.regions.contains(id) {
				self.relation_mode = false;
				self.relation_source = None;
			}
		}
	}
}
