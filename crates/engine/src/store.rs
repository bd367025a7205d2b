//! Completions and predictions of one task.

use annotix_primitives::CompletionId;
use tracing::debug;

use crate::completion::{Completion, CompletionKind};
use crate::tree::TagTree;

/// Holds every completion and prediction of the current task and tracks which
/// one is selected. Once anything has been added exactly one entry is
/// selected.
#[derive(Debug, Default)]
pub struct CompletionStore {
	completions: Vec<Completion>,
	predictions: Vec<Completion>,
	selected: Option<CompletionId>,
}

impl CompletionStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a completion over `tree`; selects it if nothing is selected yet.
	pub fn add_completion(&mut self, tree: TagTree, pk: Option<String>) -> CompletionId {
		self.add(CompletionKind::Completion, tree, pk)
	}

	/// Adds a read-only prediction over `tree`.
	pub fn add_prediction(&mut self, tree: TagTree, pk: Option<String>) -> CompletionId {
		self.add(CompletionKind::Prediction, tree, pk)
	}

	fn add(&mut self, kind: CompletionKind, tree: TagTree, pk: Option<String>) -> CompletionId {
		let mut completion = Completion::new(kind, tree);
		completion.set_pk(pk);
		let id = completion.id();
		debug!(id = %id, ?kind, "completion added");
		match kind {
			CompletionKind::Completion => self.completions.push(completion),
			CompletionKind::Prediction => self.predictions.push(completion),
		}
		if self.selected.is_none() {
			self.selected = Some(id);
		}
		id
	}

	/// Selects a completion or prediction. Returns `false` for unknown ids.
	pub fn select(&mut self, id: CompletionId) -> bool {
		if self.get(id).is_none() {
			return false;
		}
		if let Some(previous) = self.selected.replace(id) {
			if previous != id {
				if let Some(prev) = self.get_mut(previous) {
					prev.stop_relation_mode();
					prev.unselect_all_regions();
				}
			}
		}
		true
	}

	pub fn selected_id(&self) -> Option<CompletionId> {
		self.selected
	}

	pub fn selected(&self) -> Option<&Completion> {
		self.get(self.selected?)
	}

	pub fn selected_mut(&mut self) -> Option<&mut Completion> {
		let id = self.selected?;
		self.get_mut(id)
	}

	pub fn get(&self, id: CompletionId) -> Option<&Completion> {
		self.iter().find(|c| c.id() == id)
	}

	pub fn get_mut(&mut self, id: CompletionId) -> Option<&mut Completion> {
		self.completions
			.iter_mut()
			.chain(self.predictions.iter_mut())
			.find(|c| c.id() == id)
	}

	pub fn completions(&self) -> &[Completion] {
		&self.completions
	}

	pub fn predictions(&self) -> &[Completion] {
		&self.predictions
	}

	/// Completions followed by predictions.
	pub fn iter(&self) -> impl Iterator<Item = &Completion> + '_ {
		self.completions.iter().chain(self.predictions.iter())
	}

	pub fn is_empty(&self) -> bool {
		self.completions.is_empty() && self.predictions.is_empty()
	}

	/// Removes a completion; if it was selected, the first remaining entry is
	/// selected instead.
	pub fn delete(&mut self, id: CompletionId) -> Option<Completion> {
		let removed = take(&mut self.completions, id).or_else(|| take(&mut self.predictions, id))?;
		if self.selected == Some(id) {
			let next = self.iter().next().map(Completion::id);
			self.selected = next;
		}
		Some(removed)
	}
}

fn take(list: &mut Vec<Completion>, id: CompletionId) -> Option<Completion> {
	let index = list.iter().position(|c| c.id() == id)?;
	Some(list.remove(index))
}
