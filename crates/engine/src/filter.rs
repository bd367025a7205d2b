//! Quick-filter engine.
//!
//! A `<Filter>` narrows the options of the group named by its `toname` by
//! hiding those whose value does not contain the query. While a filter has
//! focus it sees key events before the global hotkey table.

use annotix_primitives::{KeyCode, KeyEvent, NodeId};
use tracing::{debug, trace};

use crate::completion::selection::{select_first_visible, unselect_all};
use crate::completion::{Completion, Focus};
use crate::history::EditScope;

/// What the focused filter did with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
	/// The event edited the query or picked an option.
	Handled,
	/// The event asks the app to submit.
	Submit,
	/// The event asks the app to update.
	Update,
	/// The event asks the app to toggle fullscreen.
	ToggleFullscreen,
	/// The filter ignores the event.
	Ignored,
}

impl Completion {
	/// Target group of a filter with a resolved `toname`.
	fn filter_target(&self, filter: NodeId) -> Option<NodeId> {
		let target = self.tree().get(filter)?.kind.as_filter()?.target;
		if target.is_none() {
			debug!(filter = %filter, "filter without target");
		}
		target
	}

	/// Recomputes option visibility from the current query.
	pub fn apply_filter(&mut self, filter: NodeId) {
		if self.filter_target(filter).is_none() {
			return;
		}
		self.edit("filter", |scope| apply(scope, filter));
	}

	/// Replaces the query, refilters, and preselects the first visible option.
	pub fn apply_filter_ev(&mut self, filter: NodeId, input: &str) {
		let Some(target) = self.filter_target(filter) else {
			return;
		};
		let highlighted = self.highlighted().cloned();
		self.edit("filter", |scope| {
			scope.set_query(filter, input);
			apply(scope, filter);
			unselect_all(scope, target);
			if !input.is_empty() {
				select_first_visible(scope, target, highlighted.as_ref());
			}
		});
	}

	/// Picks the first visible option for a non-empty query.
	///
	/// With `cleanup`, a successful pick clears the query and moves focus to
	/// the `nextinput` target.
	pub fn select_first_element(&mut self, filter: NodeId) -> Option<NodeId> {
		let target = self.filter_target(filter)?;
		let tag = self.tree().node(filter).kind.as_filter()?;
		if tag.query.is_empty() {
			return None;
		}
		let cleanup = tag.cleanup;
		let highlighted = self.highlighted().cloned();

		let picked = self.edit("filter-pick", |scope| {
			let picked = select_first_visible(scope, target, highlighted.as_ref())?;
			if cleanup {
				scope.set_query(filter, "");
				apply(scope, filter);
			}
			Some(picked)
		})?;
		if cleanup {
			self.focus_next_input(filter);
		}
		Some(picked)
	}

	/// Moves focus to the input named by the filter's `nextinput`.
	pub fn focus_next_input(&mut self, filter: NodeId) {
		let Some(next) = self
			.tree()
			.get(filter)
			.and_then(|n| n.kind.as_filter())
			.map(|f| f.next_input.clone())
		else {
			return;
		};
		if next.is_empty() {
			return;
		}
		self.focus_by_name(&next);
	}

	/// Clears the query, shows every option and releases focus.
	pub fn clear_filter(&mut self, filter: NodeId) {
		if self.filter_target(filter).is_some() {
			self.edit("filter-clear", |scope| {
				scope.set_query(filter, "");
				apply(scope, filter);
			});
		}
		if self.focus() == &Focus::Filter(filter) {
			self.blur();
		}
	}

	/// Key handling of a focused filter input.
	pub fn filter_key_down(&mut self, filter: NodeId, event: &KeyEvent) -> FilterKey {
		let mods = event.modifiers;
		let outcome = match event.code {
			KeyCode::Enter if mods.ctrl => FilterKey::Submit,
			KeyCode::Enter if mods.alt => FilterKey::Update,
			KeyCode::Char('s' | 'S') if mods.alt && !mods.ctrl => FilterKey::ToggleFullscreen,
			KeyCode::Esc => {
				self.clear_filter(filter);
				FilterKey::Handled
			}
			KeyCode::Enter if mods.is_empty() => {
				self.select_first_element(filter);
				FilterKey::Handled
			}
			KeyCode::Backspace if !mods.is_command() => {
				let mut query = self.query(filter);
				query.pop();
				self.apply_filter_ev(filter, &query);
				FilterKey::Handled
			}
			_ => match event.text() {
				Some(ch) => {
					let mut query = self.query(filter);
					query.push(ch);
					self.apply_filter_ev(filter, &query);
					FilterKey::Handled
				}
				None => FilterKey::Ignored,
			},
		};
		trace!(filter = %filter, ?outcome, "filter key");
		outcome
	}

	fn query(&self, filter: NodeId) -> String {
		self.tree()
			.get(filter)
			.and_then(|n| n.kind.as_filter())
			.map(|f| f.query.clone())
			.unwrap_or_default()
	}
}

/// Shows all options for a short query, else only the matching ones.
fn apply(scope: &mut EditScope<'_>, filter: NodeId) {
	let tree = &scope.state().tree;
	let Some(tag) = tree.get(filter).and_then(|n| n.kind.as_filter()) else {
		return;
	};
	let Some(target) = tag.target else {
		return;
	};
	let updates: Vec<(NodeId, bool)> = tree
		.tied_children(target)
		.iter()
		.map(|&id| (id, tag.is_short() || tag.matches(&tree.node(id).resolved)))
		.collect();
	for (id, visible) in updates {
		scope.set_visible(id, visible);
	}
}
