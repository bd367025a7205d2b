//! Process-wide hotkey table.
//!
//! Bindings map a combo to a handler over the [`AppStore`]. Handlers look up
//! the selected completion when they run, so the table itself never refers to
//! annotation state. A later binding for the same combo replaces the earlier
//! one.

use std::sync::{Arc, LazyLock};

use annotix_input::{Dispatch, HotkeyTable, ParseError, invoke, key_to_node};
use annotix_primitives::{KeyEvent, NodeId};
use anyhow::Context;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::app::{AppStore, INTERFACE_SKIP, INTERFACE_UPDATE};
use crate::completion::Completion;
use crate::tree::TagTree;

static HOTKEYS: LazyLock<RwLock<HotkeyTable<AppStore>>> =
	LazyLock::new(|| RwLock::new(HotkeyTable::new()));

/// Binds `combo` to `handler`.
///
/// # Errors
///
/// Returns a [`ParseError`] if `combo` is not a valid key combo.
pub fn add_key<F>(combo: &str, description: Option<&str>, handler: F) -> Result<(), ParseError>
where
	F: Fn(&mut AppStore) -> anyhow::Result<()> + Send + Sync + 'static,
{
	HOTKEYS.write().add_key(combo, description, handler)?;
	Ok(())
}

/// Removes the binding for `combo`, returning whether one existed.
pub fn remove_key(combo: &str) -> Result<bool, ParseError> {
	Ok(HOTKEYS.write().remove_key(combo)?.is_some())
}

/// Canonical combos and descriptions, in first-bound order.
pub fn bindings() -> Vec<(String, Option<String>)> {
	HOTKEYS
		.read()
		.bindings()
		.map(|b| (b.combo.to_string(), b.description.clone()))
		.collect()
}

/// Removes every binding.
pub fn reset() {
	HOTKEYS.write().clear();
}

/// Runs the handler bound to the combo of `event`.
///
/// The handler is cloned out of the table first, so it may itself change
/// bindings.
pub fn dispatch(store: &mut AppStore, event: &KeyEvent) -> Dispatch {
	let combo = key_to_node(event);
	let handler = HOTKEYS.read().handler(&combo);
	match handler {
		Some(handler) => invoke(&handler, store, &combo),
		None => {
			trace!(combo = %combo, "no hotkey bound");
			Dispatch::Unbound
		}
	}
}

fn selected(store: &mut AppStore) -> anyhow::Result<&mut Completion> {
	store.selected_mut().context("no completion selected")
}

/// Binds the application-level defaults. Skip and update are bound only for
/// stores exposing those interfaces.
pub(crate) fn register_defaults(store: &AppStore) -> Result<(), ParseError> {
	add_key("ctrl+enter", Some("Submit"), |store| {
		store.submit_completion();
		Ok(())
	})?;
	if store.has_interface(INTERFACE_SKIP) {
		add_key("ctrl+space", Some("Skip task"), |store| {
			store.skip_task();
			Ok(())
		})?;
	}
	if store.has_interface(INTERFACE_UPDATE) {
		add_key("alt+enter", Some("Update"), |store| {
			store.update_completion();
			Ok(())
		})?;
	}
	add_key("ctrl+backspace", Some("Delete all regions"), |store| {
		selected(store)?.delete_all_regions();
		Ok(())
	})?;
	add_key("r", Some("Create relation from region"), |store| {
		let c = selected(store)?;
		if let (Some(id), false) = (c.highlighted().cloned(), c.relation_mode()) {
			c.start_relation_mode(&id);
		}
		Ok(())
	})?;
	add_key("u", Some("Unselect region"), |store| {
		let c = selected(store)?;
		if c.highlighted().is_some() && !c.relation_mode() {
			c.unselect_all_regions();
		}
		Ok(())
	})?;
	add_key("h", Some("Hide region"), |store| {
		let c = selected(store)?;
		if let (Some(id), false) = (c.highlighted().cloned(), c.relation_mode()) {
			c.toggle_region_hidden(&id);
		}
		Ok(())
	})?;
	add_key("ctrl+z", Some("Undo"), |store| {
		selected(store)?.undo();
		Ok(())
	})?;
	add_key("ctrl+y", Some("Redo"), |store| {
		selected(store)?.redo();
		Ok(())
	})?;
	add_key("alt+s", Some("Toggle fullscreen"), |store| {
		store.settings.toggle_fullscreen();
		Ok(())
	})?;
	add_key("ctrl+escape", Some("Exit relation mode"), |store| {
		let c = selected(store)?;
		if c.relation_mode() {
			c.stop_relation_mode();
		}
		Ok(())
	})?;
	add_key("backspace", Some("Delete region"), |store| {
		let c = selected(store)?;
		let Some(id) = c.highlighted().cloned() else {
			return Ok(());
		};
		let owner = c
			.regions()
			.get(&id)
			.and_then(|r| c.tree().get(r.owner))
			.and_then(|n| n.name.clone());
		c.delete_region(&id);
		if let Some(owner) = owner {
			c.focus_by_name(&owner);
		}
		Ok(())
	})?;
	add_key("alt+tab", Some("Next region"), |store| {
		selected(store)?.select_next_region();
		Ok(())
	})?;
	debug!(bindings = HOTKEYS.read().len(), "default hotkeys registered");
	Ok(())
}

/// Binds the `hotkey` attributes of `tree`'s options and filters.
pub(crate) fn bind_tag_hotkeys(tree: &TagTree) {
	let mut table = HOTKEYS.write();
	for (id, combo) in tree.hotkeys() {
		let node = tree.node(id);
		let label = match node.result_value() {
			"" => node.name.as_deref().unwrap_or_default(),
			value => value,
		};
		let description = format!("{} {label}", node.tag_name);
		table.bind(combo, Some(description), Arc::new(tag_handler(id)));
	}
}

fn tag_handler(node: NodeId) -> impl Fn(&mut AppStore) -> anyhow::Result<()> + Send + Sync + 'static {
	move |store| {
		selected(store)?.on_hot_key(node);
		Ok(())
	}
}
