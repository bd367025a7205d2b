//! Loading inputs and replaying scripted sessions against an [`AppStore`].

use std::fs;
use std::path::Path;

use annotix_engine::hotkeys;
use annotix_engine::{
	AppStore, Completion, ConfigNode, InitPayload, Region, ResultItem, Settings, Task, TreeBuilder,
	Widget,
};
use annotix_input::node_to_key;
use annotix_primitives::{KeyEvent, NodeId};
use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::Map;
use tracing::{debug, warn};

use crate::cli::Inputs;
use crate::events::{Event, ReportEvents};
use crate::script::Action;

/// Reads the configuration and optional task named by `inputs`.
pub fn load_inputs(inputs: &Inputs) -> anyhow::Result<(ConfigNode, Option<Task>)> {
	let source = read(&inputs.config)?;
	let config = ConfigNode::from_json(&source)
		.with_context(|| format!("invalid config {}", inputs.config.display()))?;
	let task = match &inputs.task {
		Some(path) => {
			let source = read(path)?;
			Some(Task::from_json(&source).with_context(|| format!("invalid task {}", path.display()))?)
		}
		None => None,
	};
	Ok((config, task))
}

pub fn read(path: &Path) -> anyhow::Result<String> {
	fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
	pub nodes: usize,
	pub names: Vec<String>,
	pub groups: Vec<GroupSummary>,
	pub hotkeys: Vec<HotkeySummary>,
	pub unresolved: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GroupSummary {
	pub name: Option<String>,
	pub tag: &'static str,
	pub mode: &'static str,
	pub to_name: Option<String>,
	pub options: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HotkeySummary {
	pub combo: String,
	pub tag: &'static str,
	pub value: String,
}

/// Builds the tag tree and summarizes it.
pub fn check(config: &ConfigNode, task: Option<&Task>, lenient: bool) -> anyhow::Result<CheckReport> {
	let registry = annotix_engine::tags();
	let tree = TreeBuilder::new(&registry)
		.with_task(task)
		.lenient(lenient)
		.build(config)?;

	let mut names: Vec<String> = tree.names().keys().cloned().collect();
	names.sort();

	let groups = tree
		.iter()
		.filter_map(|node| {
			let group = node.kind.as_group()?;
			Some(GroupSummary {
				name: node.name.clone(),
				tag: node.kind.type_name(),
				mode: group.mode.as_str(),
				to_name: group.to_name.clone(),
				options: tree
					.tied_children(node.id)
					.iter()
					.map(|&id| tree.node(id).result_value().to_owned())
					.collect(),
			})
		})
		.collect();

	let hotkeys = tree
		.hotkeys()
		.map(|(id, combo)| {
			let node = tree.node(id);
			HotkeySummary {
				combo: combo.to_string(),
				tag: node.kind.type_name(),
				value: node.name.clone().unwrap_or_else(|| node.resolved.clone()),
			}
		})
		.collect();

	let unresolved = tree
		.unresolved()
		.iter()
		.map(|r| format!("{} {}=\"{}\"", tree.node(r.node).tag_name, r.attribute, r.target))
		.collect();

	Ok(CheckReport {
		nodes: tree.len(),
		names,
		groups,
		hotkeys,
		unresolved,
	})
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
	pub interfaces: Vec<String>,
	pub settings: Settings,
	pub lenient: bool,
}

#[derive(Debug, Serialize)]
pub struct BindingSummary {
	pub combo: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
	pub events: Vec<Event>,
	pub result: Vec<ResultItem>,
	pub can_undo: bool,
	pub can_redo: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub widget: Option<Widget>,
}

/// An [`AppStore`] driven by scripted input.
///
/// Creating a session clears the process-wide hotkey table, so only one
/// session should be live at a time.
#[derive(Debug)]
pub struct Session {
	store: AppStore,
	events: ReportEvents,
}

impl Session {
	pub fn new(config: ConfigNode, task: Option<Task>, options: SessionOptions) -> anyhow::Result<Self> {
		hotkeys::reset();
		let events = ReportEvents::default();
		let mut store = AppStore::new(config)
			.with_task(task)
			.with_interfaces(options.interfaces)
			.with_settings(options.settings)
			.with_events(events.clone())
			.lenient(options.lenient);
		store.after_create()?;
		Ok(Self { store, events })
	}

	/// Loads existing results. Without any, an empty completion is created.
	pub fn load(&mut self, payload: &InitPayload) -> anyhow::Result<()> {
		self.store.initialize_store(payload)?;
		Ok(())
	}

	pub fn bindings(&self) -> Vec<BindingSummary> {
		hotkeys::bindings()
			.into_iter()
			.map(|(combo, description)| BindingSummary { combo, description })
			.collect()
	}

	pub fn run(&mut self, actions: &[Action]) -> anyhow::Result<()> {
		for action in actions {
			self.apply(action)?;
		}
		Ok(())
	}

	pub fn apply(&mut self, action: &Action) -> anyhow::Result<()> {
		debug!(?action, "applying");
		match action {
			Action::Key(combos) => {
				for combo in combos {
					self.press(&node_to_key(combo));
				}
			}
			Action::Type(text) => {
				for ch in text.chars() {
					self.press(&KeyEvent::char(ch));
				}
			}
			Action::Click(value) => {
				let node = self.option(value)?;
				if !self.store.click_choice(node) {
					warn!(%value, "click ignored");
				}
			}
			Action::Region { id, object, span } => {
				let completion = self.selected_mut()?;
				let tree = completion.tree();
				let owner = tree
					.by_name(object)
					.filter(|&n| tree.node(n).kind.is_object())
					.with_context(|| format!("no object tag named '{object}'"))?;
				let mut value = Map::new();
				if let Some((start, end)) = span {
					value.insert("start".into(), (*start).into());
					value.insert("end".into(), (*end).into());
				}
				completion.add_region(Region::with_id(id.clone(), owner, value));
			}
			Action::Highlight(id) => {
				if !self.store.click_region(id) {
					bail!("unknown region '{id}'");
				}
			}
			Action::Relation(from, to) => {
				if !self.selected_mut()?.add_relation(from, to) {
					warn!(%from, %to, "relation not added");
				}
			}
			Action::Undo => {
				self.selected_mut()?.undo();
			}
			Action::Redo => {
				self.selected_mut()?.redo();
			}
			Action::Submit => {
				let outcome = self.store.submit_completion();
				debug!(?outcome, "submit");
			}
			Action::Update => {
				let outcome = self.store.update_completion();
				debug!(?outcome, "update");
			}
			Action::Skip => self.store.skip_task(),
		}
		Ok(())
	}

	fn press(&mut self, event: &KeyEvent) {
		let outcome = self.store.handle_key(event);
		debug!(?event, ?outcome, "key");
	}

	fn selected_mut(&mut self) -> anyhow::Result<&mut Completion> {
		self.store.selected_mut().context("no completion selected")
	}

	/// Finds the option whose value or alias is `value`.
	fn option(&self, value: &str) -> anyhow::Result<NodeId> {
		let completion = self.store.selected().context("no completion selected")?;
		completion
			.tree()
			.iter()
			.find(|n| n.kind.as_selectable().is_some() && (n.resolved == value || n.result_value() == value))
			.map(|n| n.id)
			.with_context(|| format!("no option with value '{value}'"))
	}

	/// Drains the observed events and snapshots the selected completion.
	pub fn report(&self, render: bool) -> RunReport {
		let selected = self.store.selected();
		RunReport {
			events: self.events.take(),
			result: selected.map(Completion::serialize).unwrap_or_default(),
			can_undo: selected.is_some_and(Completion::can_undo),
			can_redo: selected.is_some_and(Completion::can_redo),
			widget: render.then(|| self.store.render()),
		}
	}
}

/// Reads the optional results and settings files of a run.
pub fn load_run_files(
	results: Option<&Path>,
	settings: Option<&Path>,
) -> anyhow::Result<(InitPayload, Settings)> {
	let payload = match results {
		Some(path) => InitPayload::from_json(&read(path)?)
			.with_context(|| format!("invalid results {}", path.display()))?,
		None => InitPayload::default(),
	};
	let settings = match settings {
		Some(path) => Settings::load(path)?,
		None => Settings::default(),
	};
	Ok((payload, settings))
}
