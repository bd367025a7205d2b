use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use annotix_keymap_parser::{Node, ParseError, parse};
use annotix_primitives::KeyEvent;
use rustc_hash::FxHashMap;
use tracing::{debug, error, trace, warn};

use crate::adapter::key_to_node;

/// Handler invoked for a bound combo.
pub type HotkeyHandler<C> = Arc<dyn Fn(&mut C) -> anyhow::Result<()> + Send + Sync>;

/// A bound combo with its handler and optional help text.
pub struct Binding<C> {
	/// Canonical combo.
	pub combo: Node,
	/// Human-readable description for help overlays.
	pub description: Option<String>,
	handler: HotkeyHandler<C>,
}

impl<C> Binding<C> {
	pub fn handler(&self) -> &HotkeyHandler<C> {
		&self.handler
	}
}

impl<C> Clone for Binding<C> {
	fn clone(&self) -> Self {
		Self {
			combo: self.combo,
			description: self.description.clone(),
			handler: Arc::clone(&self.handler),
		}
	}
}

impl<C> fmt::Debug for Binding<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binding")
			.field("combo", &self.combo.to_string())
			.field("description", &self.description)
			.finish_non_exhaustive()
	}
}

/// Outcome of dispatching one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
	/// A handler ran to completion.
	Handled,
	/// Nothing is bound to the combo.
	Unbound,
	/// The handler returned an error or panicked; the failure was logged.
	Failed,
}

/// Combo → handler table. Later registrations for the same combo replace
/// earlier ones.
pub struct HotkeyTable<C> {
	bindings: FxHashMap<Node, Binding<C>>,
	order: Vec<Node>,
}

impl<C> Default for HotkeyTable<C> {
	fn default() -> Self {
		Self {
			bindings: FxHashMap::default(),
			order: Vec::new(),
		}
	}
}

impl<C> fmt::Debug for HotkeyTable<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.bindings()).finish()
	}
}

impl<C> HotkeyTable<C> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `combo` (e.g. `"ctrl+z"`) to `handler`.
	///
	/// Returns the binding that was replaced, if any.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] if `combo` is not a valid key combo.
	pub fn add_key<F>(
		&mut self,
		combo: &str,
		description: Option<&str>,
		handler: F,
	) -> Result<Option<Binding<C>>, ParseError>
	where
		F: Fn(&mut C) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		let node = parse(combo)?;
		Ok(self.bind(node, description.map(str::to_owned), Arc::new(handler)))
	}

	/// Binds an already parsed combo.
	pub fn bind(
		&mut self,
		combo: Node,
		description: Option<String>,
		handler: HotkeyHandler<C>,
	) -> Option<Binding<C>> {
		let binding = Binding {
			combo,
			description,
			handler,
		};
		let previous = self.bindings.insert(combo, binding);
		match &previous {
			Some(_) => debug!(combo = %combo, "hotkey rebound"),
			None => {
				trace!(combo = %combo, "hotkey bound");
				self.order.push(combo);
			}
		}
		previous
	}

	/// Removes the binding for `combo`.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] if `combo` is not a valid key combo.
	pub fn remove_key(&mut self, combo: &str) -> Result<Option<Binding<C>>, ParseError> {
		let node = parse(combo)?;
		Ok(self.unbind(&node))
	}

	pub fn unbind(&mut self, combo: &Node) -> Option<Binding<C>> {
		let removed = self.bindings.remove(combo)?;
		self.order.retain(|n| n != combo);
		Some(removed)
	}

	pub fn get(&self, combo: &Node) -> Option<&Binding<C>> {
		self.bindings.get(combo)
	}

	/// Returns a clone of the handler bound to `combo`.
	///
	/// Callers holding the table behind a lock use this to release the lock
	/// before running the handler.
	pub fn handler(&self, combo: &Node) -> Option<HotkeyHandler<C>> {
		self.bindings.get(combo).map(|b| Arc::clone(&b.handler))
	}

	/// Returns bindings in the order their combos were first bound.
	pub fn bindings(&self) -> impl Iterator<Item = &Binding<C>> + '_ {
		self.order.iter().filter_map(|n| self.bindings.get(n))
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	pub fn clear(&mut self) {
		self.bindings.clear();
		self.order.clear();
	}

	/// Normalizes `event` and runs the matching handler against `ctx`.
	pub fn dispatch(&self, ctx: &mut C, event: &KeyEvent) -> Dispatch {
		self.dispatch_node(ctx, &key_to_node(event))
	}

	/// Runs the handler bound to `combo` against `ctx`.
	pub fn dispatch_node(&self, ctx: &mut C, combo: &Node) -> Dispatch {
		match self.bindings.get(combo) {
			Some(binding) => invoke(&binding.handler, ctx, combo),
			None => Dispatch::Unbound,
		}
	}
}

/// Runs a handler with failure isolation.
pub fn invoke<C>(handler: &HotkeyHandler<C>, ctx: &mut C, combo: &Node) -> Dispatch {
	match panic::catch_unwind(AssertUnwindSafe(|| handler(ctx))) {
		Ok(Ok(())) => {
			trace!(combo = %combo, "hotkey handled");
			Dispatch::Handled
		}
		Ok(Err(err)) => {
			warn!(combo = %combo, error = %err, "hotkey handler failed");
			Dispatch::Failed
		}
		Err(payload) => {
			let message = payload
				.downcast_ref::<&str>()
				.map(|s| s.to_string())
				.or_else(|| payload.downcast_ref::<String>().cloned())
				.unwrap_or_else(|| "non-string panic payload".to_string());
			error!(combo = %combo, panic = %message, "hotkey handler panicked");
			Dispatch::Failed
		}
	}
}
