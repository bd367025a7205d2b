use annotix_primitives::NodeId;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::completion::{Completion, CompletionKind};
use crate::fixtures::{build, fruits};

fn completion(mode: &str) -> (Completion, Vec<NodeId>) {
	let completion = Completion::new(CompletionKind::Completion, build(&fruits(mode)));
	let fruit = completion.tree().by_name("fruit").unwrap();
	let options = completion.tree().tied_children(fruit).to_vec();
	(completion, options)
}

#[test]
fn undo_and_redo_move_the_cursor() {
	let (mut c, options) = completion("multiple");
	assert!(!c.can_undo());
	assert!(!c.can_redo());

	c.toggle_selected(options[0]);
	c.toggle_selected(options[1]);
	assert_eq!(c.history().cursor(), 2);
	assert!(c.can_undo());

	assert!(c.undo());
	assert!(!c.tree().node(options[1]).is_selected());
	assert!(c.tree().node(options[0]).is_selected());
	assert!(c.can_redo());

	assert!(c.redo());
	assert!(c.tree().node(options[1]).is_selected());
	assert!(!c.redo());
}

#[test]
fn new_edit_discards_the_redo_tail() {
	let (mut c, options) = completion("multiple");
	c.toggle_selected(options[0]);
	c.toggle_selected(options[1]);
	c.undo();
	assert!(c.can_redo());

	c.toggle_selected(options[2]);
	assert!(!c.can_redo());
	assert_eq!(c.history().len(), 2);
	assert!(!c.redo());
	assert!(!c.tree().node(options[1]).is_selected());
}

#[test]
fn empty_edits_are_not_recorded() {
	let (mut c, options) = completion("single");
	let fruit = c.tree().group_of(options[0]).unwrap();
	c.unselect_all(fruit);
	assert!(c.history().is_empty());
}

#[test]
fn reset_restores_the_initial_state() {
	let (mut c, options) = completion("multiple");
	let initial = c.state().clone();
	c.toggle_selected(options[0]);
	c.toggle_selected(options[2]);
	c.reset_history();
	assert_eq!(c.state(), &initial);
	assert!(!c.can_undo());
}

#[test]
fn reinit_makes_a_new_baseline() {
	let (mut c, options) = completion("multiple");
	c.toggle_selected(options[0]);
	c.reinit_history();
	assert!(!c.can_undo());
	let baseline = c.state().clone();

	c.toggle_selected(options[1]);
	c.reset_history();
	assert_eq!(c.state(), &baseline);
	assert!(c.tree().node(options[0]).is_selected());
}

#[test]
fn capacity_folds_the_oldest_entry_into_the_baseline() {
	let (c, options) = completion("multiple");
	let mut state = c.state().clone();
	let mut history = History::with_capacity(state.clone(), 2);

	for &node in &options {
		let tx = Transaction {
			label: "toggle",
			edits: vec![Edit::Selected {
				node,
				before: false,
				after: true,
			}],
		};
		tx.apply(&mut state);
		history.record(tx);
	}
	assert_eq!(history.len(), 2);
	assert!(history.initial().tree.node(options[0]).is_selected());

	while history.undo(&mut state) {}
	assert_eq!(&state, history.initial());
}

proptest! {
	#[test]
	fn undo_then_redo_round_trips(
		toggles in prop::collection::vec(0usize..3, 1..24),
		back in 0usize..24,
	) {
		let (mut c, options) = completion("multiple");
		for &i in &toggles {
			c.toggle_selected(options[i]);
		}
		let after = c.state().clone();
		let k = back.min(c.history().len());

		for _ in 0..k {
			prop_assert!(c.undo());
		}
		for _ in 0..k {
			prop_assert!(c.redo());
		}
		prop_assert_eq!(c.state(), &after);
	}

	#[test]
	fn undoing_everything_restores_the_start(
		toggles in prop::collection::vec(0usize..3, 0..24),
	) {
		let (mut c, options) = completion("single");
		let start = c.state().clone();
		for &i in &toggles {
			c.toggle_selected(options[i]);
		}
		while c.undo() {}
		prop_assert_eq!(c.state(), &start);
	}
}
