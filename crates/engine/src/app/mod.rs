//! Application root.
//!
//! [`AppStore`] owns the configuration, task, completion store, settings and
//! host callbacks. Key events enter through [`AppStore::handle_key`]: a focused
//! filter sees them first, then the process-wide hotkey table.

mod events;
#[cfg(test)]
mod tests;

use annotix_input::{Dispatch, ParseError};
use annotix_primitives::{CompletionId, KeyEvent, NodeId, RegionId};
use tracing::{debug, trace, warn};

pub use events::{AppEvents, NoopEvents};

use crate::completion::{Completion, ValidationIssue};
use crate::config::ConfigNode;
use crate::error::{BuildError, EngineError};
use crate::filter::FilterKey;
use crate::hotkeys;
use crate::registry;
use crate::result::InitPayload;
use crate::settings::Settings;
use crate::store::CompletionStore;
use crate::tags::DocumentViewer;
use crate::task::Task;
use crate::tree::{TagTree, TreeBuilder};
use crate::view::{RenderContext, Widget};

/// Interface capability enabling the skip action.
pub const INTERFACE_SKIP: &str = "skip";
/// Interface capability enabling the update action.
pub const INTERFACE_UPDATE: &str = "update";

/// UI flags toggled by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
	pub showing_settings: bool,
	pub showing_description: bool,
	pub is_loading: bool,
	pub is_submitting: bool,
	pub no_task: bool,
	pub no_access: bool,
	pub labeled_success: bool,
}

/// Result of a submit or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Handed to [`AppEvents`].
	Submitted,
	/// Required groups are empty; nothing was sent.
	Invalid(Vec<ValidationIssue>),
	/// There is no selected completion.
	NoCompletion,
}

pub struct AppStore {
	config: ConfigNode,
	task: Option<Task>,
	interfaces: Vec<String>,
	description: Option<String>,
	lenient: bool,
	completion_store: CompletionStore,
	pub settings: Settings,
	pub flags: Flags,
	events: Box<dyn AppEvents>,
}

impl std::fmt::Debug for AppStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppStore")
			.field("task", &self.task.as_ref().and_then(|t| t.id))
			.field("interfaces", &self.interfaces)
			.field("completions", &self.completion_store.completions().len())
			.field("predictions", &self.completion_store.predictions().len())
			.field("settings", &self.settings)
			.field("flags", &self.flags)
			.finish_non_exhaustive()
	}
}

impl AppStore {
	pub fn new(config: ConfigNode) -> Self {
		Self {
			config,
			task: None,
			interfaces: Vec::new(),
			description: None,
			lenient: false,
			completion_store: CompletionStore::new(),
			settings: Settings::default(),
			flags: Flags::default(),
			events: Box::new(NoopEvents),
		}
	}

	pub fn with_task(mut self, task: Option<Task>) -> Self {
		self.flags.no_task = task.is_none();
		self.task = task;
		self
	}

	pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for interface in interfaces {
			self.add_interface(interface);
		}
		self
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = settings;
		self
	}

	pub fn with_events(mut self, events: impl AppEvents + 'static) -> Self {
		self.events = Box::new(events);
		self
	}

	/// Keeps tags with unresolved `toname` references instead of failing.
	pub fn lenient(mut self, lenient: bool) -> Self {
		self.lenient = lenient;
		self
	}

	/// Registers the default hotkeys for the configured interfaces.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] if a default combo fails to parse.
	pub fn after_create(&mut self) -> Result<(), ParseError> {
		hotkeys::register_defaults(self)
	}

	pub fn config(&self) -> &ConfigNode {
		&self.config
	}

	pub fn task(&self) -> Option<&Task> {
		self.task.as_ref()
	}

	/// Replaces the task. Existing completions keep their trees.
	pub fn assign_task(&mut self, task: Option<Task>) {
		self.flags.no_task = task.is_none();
		self.task = task;
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description;
	}

	pub fn has_interface(&self, name: &str) -> bool {
		self.interfaces.iter().any(|i| i == name)
	}

	pub fn add_interface(&mut self, name: impl Into<String>) {
		let name = name.into();
		if !self.has_interface(&name) {
			self.interfaces.push(name);
		}
	}

	pub fn interfaces(&self) -> &[String] {
		&self.interfaces
	}

	pub fn set_flags(&mut self, update: impl FnOnce(&mut Flags)) {
		update(&mut self.flags);
	}

	pub fn toggle_settings(&mut self) {
		self.flags.showing_settings = !self.flags.showing_settings;
	}

	pub fn toggle_description(&mut self) {
		self.flags.showing_description = !self.flags.showing_description;
	}

	pub fn completion_store(&self) -> &CompletionStore {
		&self.completion_store
	}

	pub fn selected(&self) -> Option<&Completion> {
		self.completion_store.selected()
	}

	pub fn selected_mut(&mut self) -> Option<&mut Completion> {
		self.completion_store.selected_mut()
	}

	/// Builds a fresh tree from the configuration and task.
	pub fn build_tree(&self) -> Result<TagTree, BuildError> {
		let registry = registry::tags();
		TreeBuilder::new(&registry)
			.with_task(self.task.as_ref())
			.lenient(self.lenient)
			.build(&self.config)
	}

	/// Adds a completion without selecting it.
	pub fn add_completion(&mut self, pk: Option<String>) -> Result<CompletionId, BuildError> {
		let tree = self.build_tree()?;
		Ok(self.completion_store.add_completion(tree, pk))
	}

	/// Adds a prediction without selecting it.
	pub fn add_prediction(&mut self, pk: Option<String>) -> Result<CompletionId, BuildError> {
		let tree = self.build_tree()?;
		Ok(self.completion_store.add_prediction(tree, pk))
	}

	/// Adds and selects an empty, locally created completion.
	pub fn add_initial_completion(&mut self) -> Result<CompletionId, BuildError> {
		let id = self.add_completion(None)?;
		if let Some(c) = self.completion_store.get_mut(id) {
			c.set_user_generate(true);
		}
		self.select_completion(id);
		Ok(id)
	}

	/// Selects a completion or prediction and binds its tag hotkeys.
	pub fn select_completion(&mut self, id: CompletionId) -> bool {
		if !self.completion_store.select(id) {
			return false;
		}
		if let Some(c) = self.completion_store.selected() {
			hotkeys::bind_tag_hotkeys(c.tree());
		}
		true
	}

	/// Loads existing predictions and completions.
	///
	/// Each item is added, selected, filled from its result and given a fresh
	/// history. Without any completion an empty one is created, so the store
	/// always ends with a completion selected.
	pub fn initialize_store(&mut self, payload: &InitPayload) -> Result<(), EngineError> {
		for item in &payload.predictions {
			let id = self.add_prediction(item.pk())?;
			self.load_item(id, item);
		}
		for item in &payload.completions {
			let id = self.add_completion(item.pk())?;
			self.load_item(id, item);
		}
		if self.completion_store.completions().is_empty() {
			self.add_initial_completion()?;
		}
		debug!(
			completions = payload.completions.len(),
			predictions = payload.predictions.len(),
			"store initialized"
		);
		self.events.on_load();
		Ok(())
	}

	fn load_item(&mut self, id: CompletionId, item: &crate::result::InitItem) {
		self.select_completion(id);
		if let Some(c) = self.completion_store.get_mut(id) {
			c.deserialize(&item.result);
			c.reinit_history();
		}
	}

	/// Drops every completion.
	pub fn reset_state(&mut self) {
		self.completion_store = CompletionStore::new();
	}

	/// Validates and submits the selected completion.
	pub fn submit_completion(&mut self) -> SubmitOutcome {
		self.send(SendKind::Submit)
	}

	/// Sends an update of the selected completion. Updates are not validated.
	pub fn update_completion(&mut self) -> SubmitOutcome {
		self.send(SendKind::Update)
	}

	fn send(&mut self, kind: SendKind) -> SubmitOutcome {
		let Some(completion) = self.completion_store.selected_mut() else {
			warn!(?kind, "no completion selected");
			return SubmitOutcome::NoCompletion;
		};
		let issues = match kind {
			SendKind::Submit => completion.validation_issues(),
			SendKind::Update => Vec::new(),
		};
		if !issues.is_empty() {
			debug!(?kind, issues = issues.len(), "completion invalid");
			for issue in &issues {
				self.events.alert(&issue.message);
			}
			return SubmitOutcome::Invalid(issues);
		}

		completion.before_send();
		completion.send_user_generate();
		match kind {
			SendKind::Submit => self.events.on_submit_completion(self.task.as_ref(), completion),
			SendKind::Update => self.events.on_update_completion(self.task.as_ref(), completion),
		}
		SubmitOutcome::Submitted
	}

	pub fn skip_task(&mut self) {
		self.events.on_skip_task(self.task.as_ref());
	}

	/// Routes a key event: focused filter first, then the hotkey table.
	pub fn handle_key(&mut self, event: &KeyEvent) -> Dispatch {
		let filter = self.completion_store.selected().and_then(Completion::focused_filter);
		if let Some(filter) = filter {
			let outcome = match self.completion_store.selected_mut() {
				Some(c) => c.filter_key_down(filter, event),
				None => FilterKey::Ignored,
			};
			match outcome {
				FilterKey::Handled => return Dispatch::Handled,
				FilterKey::Submit => {
					self.submit_completion();
					return Dispatch::Handled;
				}
				FilterKey::Update => {
					self.update_completion();
					return Dispatch::Handled;
				}
				FilterKey::ToggleFullscreen => {
					self.settings.toggle_fullscreen();
					return Dispatch::Handled;
				}
				FilterKey::Ignored => return Dispatch::Unbound,
			}
		}

		if !self.settings.enable_hotkeys {
			trace!("hotkeys disabled");
			return Dispatch::Unbound;
		}
		hotkeys::dispatch(self, event)
	}

	/// Click on an option. Refused on read-only groups and completions.
	pub fn click_choice(&mut self, node: NodeId) -> bool {
		let Some(c) = self.completion_store.selected_mut() else {
			return false;
		};
		let tree = c.tree();
		let readonly = tree
			.group_of(node)
			.and_then(|g| tree.group(g))
			.is_none_or(|g| g.readonly);
		if !c.editable() || readonly {
			debug!(node = %node, "click on read-only option ignored");
			return false;
		}
		c.toggle_selected(node);
		true
	}

	/// Click on a region.
	pub fn click_region(&mut self, id: &RegionId) -> bool {
		self.completion_store
			.selected_mut()
			.is_some_and(|c| c.highlight_region(id))
	}

	/// Renders the selected completion.
	pub fn render(&self) -> Widget {
		let Some(completion) = self.completion_store.selected() else {
			return Widget::Empty;
		};
		let registry = registry::tags();
		RenderContext {
			completion,
			settings: &self.settings,
			task: self.task.as_ref(),
			registry: &registry,
		}
		.render()
	}

	/// Hands the documents of the selected completion to `viewer`.
	pub fn open_documents(&self, viewer: &mut dyn DocumentViewer) {
		if let Some(c) = self.completion_store.selected() {
			crate::tags::open_documents(c.tree(), self.task.as_ref(), viewer);
		}
	}
}

#[derive(Debug, Clone, Copy)]
enum SendKind {
	Submit,
	Update,
}
