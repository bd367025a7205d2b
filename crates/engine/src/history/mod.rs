//! Undo/redo history of a completion.
//!
//! ```text
//!  initial ── tx0 ── tx1 ── tx2 ── tx3
//!                           ▲
//!                         cursor        undo ◄─┼─► redo
//! ```
//!
//! Entries before the cursor are applied to the live state; entries at and
//! after it are redoable. Recording a new transaction drops everything from
//! the cursor on. The log is bounded: once it holds [`MAX_HISTORY`] entries the
//! oldest one is folded into the initial snapshot.

mod edit;
#[cfg(test)]
mod tests;

use tracing::trace;

pub use edit::{Edit, EditScope, Transaction};

use crate::completion::AnnotationState;

/// Default number of transactions kept.
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
	entries: Vec<Transaction>,
	cursor: usize,
	initial: AnnotationState,
	capacity: usize,
}

impl History {
	/// Starts an empty log with `initial` as its baseline.
	pub fn new(initial: AnnotationState) -> Self {
		Self::with_capacity(initial, MAX_HISTORY)
	}

	pub fn with_capacity(initial: AnnotationState, capacity: usize) -> Self {
		Self {
			entries: Vec::new(),
			cursor: 0,
			initial,
			capacity: capacity.max(1),
		}
	}

	pub fn can_undo(&self) -> bool {
		self.cursor > 0
	}

	pub fn can_redo(&self) -> bool {
		self.cursor < self.entries.len()
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[Transaction] {
		&self.entries
	}

	/// State the log starts from.
	pub fn initial(&self) -> &AnnotationState {
		&self.initial
	}

	/// Appends an already applied transaction, discarding the redo tail.
	pub(crate) fn record(&mut self, tx: Transaction) {
		self.entries.truncate(self.cursor);
		trace!(label = tx.label, edits = tx.edits.len(), cursor = self.cursor, "history push");
		self.entries.push(tx);
		if self.entries.len() > self.capacity {
			let oldest = self.entries.remove(0);
			oldest.apply(&mut self.initial);
		}
		self.cursor = self.entries.len();
	}

	/// Reverts the entry before the cursor.
	pub(crate) fn undo(&mut self, state: &mut AnnotationState) -> bool {
		if !self.can_undo() {
			return false;
		}
		self.cursor -= 1;
		let tx = &self.entries[self.cursor];
		trace!(label = tx.label, cursor = self.cursor, "undo");
		tx.revert(state);
		true
	}

	/// Re-applies the entry at the cursor.
	pub(crate) fn redo(&mut self, state: &mut AnnotationState) -> bool {
		if !self.can_redo() {
			return false;
		}
		let tx = &self.entries[self.cursor];
		trace!(label = tx.label, cursor = self.cursor, "redo");
		tx.apply(state);
		self.cursor += 1;
		true
	}

	/// Restores the initial snapshot and clears the log.
	pub(crate) fn reset(&mut self, state: &mut AnnotationState) {
		state.clone_from(&self.initial);
		self.entries.clear();
		self.cursor = 0;
	}

	/// Makes `state` the new baseline and clears the log.
	pub(crate) fn reinit(&mut self, state: &AnnotationState) {
		self.initial.clone_from(state);
		self.entries.clear();
		self.cursor = 0;
	}
}
