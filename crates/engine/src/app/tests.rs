use std::sync::Arc;

use annotix_primitives::{KeyCode, KeyEvent, Modifiers};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;

use super::*;
use crate::completion::Focus;
use crate::fixtures::{fruits, spans, task};
use crate::regions::Region;
use crate::result::ResultItem;

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
	fn take(&self) -> Vec<String> {
		std::mem::take(&mut *self.0.lock())
	}
}

impl AppEvents for Recorder {
	fn on_load(&mut self) {
		self.0.lock().push("load".into());
	}

	fn on_submit_completion(&mut self, _task: Option<&Task>, completion: &Completion) {
		self.0.lock().push(format!("submit {}", completion.serialize().len()));
	}

	fn on_update_completion(&mut self, _task: Option<&Task>, _completion: &Completion) {
		self.0.lock().push("update".into());
	}

	fn on_skip_task(&mut self, task: Option<&Task>) {
		self.0.lock().push(format!("skip {:?}", task.and_then(|t| t.id)));
	}

	fn alert(&mut self, message: &str) {
		self.0.lock().push(format!("alert {message}"));
	}
}

fn app(config: ConfigNode, interfaces: &[&str]) -> (AppStore, Recorder) {
	hotkeys::reset();
	registry::reset_tags();
	let events = Recorder::default();
	let mut store = AppStore::new(config)
		.with_task(Some(task()))
		.with_interfaces(interfaces.iter().copied())
		.with_events(events.clone());
	store.after_create().unwrap();
	store.initialize_store(&InitPayload::default()).unwrap();
	events.take();
	(store, events)
}

fn key(code: KeyCode, modifiers: Modifiers) -> KeyEvent {
	KeyEvent::new(code, modifiers)
}

fn ctrl(ch: char) -> KeyEvent {
	key(KeyCode::Char(ch), Modifiers::CTRL)
}

#[test]
#[serial]
fn skip_hotkey_requires_the_interface() {
	let (mut store, events) = app(fruits("single"), &["submit"]);
	let space = key(KeyCode::Space, Modifiers::CTRL);
	assert_eq!(store.handle_key(&space), Dispatch::Unbound);
	assert!(events.take().is_empty());

	let (mut store, events) = app(fruits("single"), &["submit", "skip"]);
	assert_eq!(store.handle_key(&space), Dispatch::Handled);
	assert_eq!(events.take(), ["skip Some(1)"]);
}

#[test]
#[serial]
fn update_hotkey_requires_the_interface() {
	let (mut store, _) = app(fruits("single"), &[]);
	let alt_enter = key(KeyCode::Enter, Modifiers::ALT);
	assert_eq!(store.handle_key(&alt_enter), Dispatch::Unbound);

	let (mut store, events) = app(fruits("single"), &["update"]);
	assert_eq!(store.handle_key(&alt_enter), Dispatch::Handled);
	assert_eq!(events.take(), ["update"]);
}

#[test]
#[serial]
fn tag_hotkeys_toggle_the_selected_completion() {
	let (mut store, _) = app(fruits("single"), &[]);
	assert_eq!(store.handle_key(&KeyEvent::char('2')), Dispatch::Handled);
	let c = store.selected().unwrap();
	let fruit = c.tree().by_name("fruit").unwrap();
	assert_eq!(c.tree().selected_values(fruit).into_vec(), ["Banana"]);

	assert_eq!(store.handle_key(&ctrl('z')), Dispatch::Handled);
	assert!(store.selected().unwrap().tree().selected_values(fruit).is_empty());
	assert_eq!(store.handle_key(&ctrl('y')), Dispatch::Handled);
	assert_eq!(
		store.selected().unwrap().tree().selected_values(fruit).into_vec(),
		["Banana"]
	);
}

#[test]
#[serial]
fn focused_filter_intercepts_keys() {
	let (mut store, events) = app(fruits("single"), &[]);
	let shift_f = key(KeyCode::Char('F'), Modifiers::SHIFT);
	assert_eq!(store.handle_key(&shift_f), Dispatch::Handled);
	let filter = store.selected().unwrap().tree().by_name("filter").unwrap();
	assert_eq!(store.selected().unwrap().focus(), &Focus::Filter(filter));

	for ch in "pie".chars() {
		assert_eq!(store.handle_key(&KeyEvent::char(ch)), Dispatch::Handled);
	}
	let c = store.selected().unwrap();
	let fruit = c.tree().by_name("fruit").unwrap();
	assert_eq!(c.tree().selected_values(fruit).into_vec(), ["apple pie"]);

	// Digits type into the query instead of firing choice hotkeys.
	store.handle_key(&KeyEvent::char('1'));
	let c = store.selected().unwrap();
	assert_eq!(c.tree().node(filter).kind.as_filter().unwrap().query, "pie1");

	store.handle_key(&key(KeyCode::Char('s'), Modifiers::ALT));
	assert!(store.settings.fullscreen);

	store.handle_key(&key(KeyCode::Enter, Modifiers::CTRL));
	assert_eq!(events.take(), ["submit 0"]);
}

#[test]
#[serial]
fn disabled_hotkeys_leave_only_the_filter() {
	let (mut store, _) = app(fruits("single"), &[]);
	store.settings.enable_hotkeys = false;
	assert_eq!(store.handle_key(&KeyEvent::char('1')), Dispatch::Unbound);

	let filter = store.selected().unwrap().tree().by_name("filter").unwrap();
	store.selected_mut().unwrap().set_focus(Focus::Filter(filter));
	assert_eq!(store.handle_key(&KeyEvent::char('a')), Dispatch::Handled);
}

#[test]
#[serial]
fn submit_is_blocked_by_validation() {
	let config = ConfigNode::new("View").children([
		ConfigNode::new("Text").attr("name", "text").attr("value", "$text"),
		ConfigNode::new("Choices")
			.attr("name", "c")
			.attr("toName", "text")
			.attr("required", "true")
			.child(ConfigNode::new("Choice").attr("value", "Yes")),
	]);
	let (mut store, events) = app(config, &[]);
	let before = store.selected().unwrap().state().clone();

	let outcome = store.submit_completion();
	assert!(matches!(outcome, SubmitOutcome::Invalid(ref issues) if issues.len() == 1));
	assert_eq!(events.take(), ["alert Checkbox \"c\" is required."]);
	assert_eq!(store.selected().unwrap().state(), &before);

	let tree = store.selected().unwrap().tree();
	let yes = tree.tied_children(tree.by_name("c").unwrap())[0];
	assert!(store.click_choice(yes));
	assert_eq!(
		store.handle_key(&key(KeyCode::Enter, Modifiers::CTRL)),
		Dispatch::Handled
	);
	assert_eq!(events.take(), ["submit 1"]);
	assert!(!store.selected().unwrap().user_generate());
	assert!(store.selected().unwrap().sent_user_generate());
}

#[test]
#[serial]
fn update_skips_validation() {
	let config = ConfigNode::new("View").children([
		ConfigNode::new("Text").attr("name", "text").attr("value", "$text"),
		ConfigNode::new("Choices")
			.attr("name", "c")
			.attr("toName", "text")
			.attr("required", "true")
			.child(ConfigNode::new("Choice").attr("value", "Yes")),
	]);
	let (mut store, events) = app(config, &[INTERFACE_UPDATE]);
	assert!(!store.selected().unwrap().validate());

	assert_eq!(
		store.handle_key(&key(KeyCode::Enter, Modifiers::ALT)),
		Dispatch::Handled
	);
	assert_eq!(events.take(), ["update"]);
	assert_eq!(store.update_completion(), SubmitOutcome::Submitted);
	assert_eq!(events.take(), ["update"]);
}

#[test]
#[serial]
fn read_only_groups_refuse_clicks() {
	let config = ConfigNode::new("Choices")
		.attr("name", "c")
		.attr("readOnly", "true")
		.child(ConfigNode::new("Choice").attr("value", "A"));
	let (mut store, _) = app(config, &[]);
	assert!(!store.click_choice(NodeId(1)));
	assert!(store.selected().unwrap().history().is_empty());
}

#[test]
#[serial]
fn predictions_are_not_editable() {
	let (mut store, _) = app(fruits("single"), &[]);
	let id = store.add_prediction(None).unwrap();
	assert!(store.select_completion(id));
	let apple = NodeId(4);
	assert!(!store.click_choice(apple));
}

#[test]
#[serial]
fn failing_handlers_do_not_break_dispatch() {
	let (mut store, _) = app(fruits("single"), &[]);
	hotkeys::add_key("ctrl+e", Some("Explode"), |_| anyhow::bail!("boom")).unwrap();
	hotkeys::add_key("ctrl+p", None, |_| panic!("handler panic")).unwrap();

	assert_eq!(store.handle_key(&ctrl('e')), Dispatch::Failed);
	assert_eq!(store.handle_key(&ctrl('p')), Dispatch::Failed);
	assert_eq!(store.handle_key(&KeyEvent::char('1')), Dispatch::Handled);

	store.reset_state();
	assert_eq!(store.handle_key(&ctrl('z')), Dispatch::Failed);
}

#[test]
#[serial]
fn region_hotkeys() {
	let (mut store, _) = app(spans(), &[]);
	let c = store.selected_mut().unwrap();
	let text = c.tree().by_name("text").unwrap();
	let a = c.add_region(Region::new(text, serde_json::Map::new()));
	let b = c.add_region(Region::new(text, serde_json::Map::new()));

	let alt_tab = key(KeyCode::Tab, Modifiers::ALT);
	store.handle_key(&alt_tab);
	assert_eq!(store.selected().unwrap().highlighted(), Some(&a));

	store.handle_key(&KeyEvent::char('r'));
	assert!(store.selected().unwrap().relation_mode());
	store.handle_key(&KeyEvent::char('h'));
	assert!(!store.selected().unwrap().regions().get(&a).unwrap().hidden);
	store.handle_key(&key(KeyCode::Esc, Modifiers::CTRL));
	assert!(!store.selected().unwrap().relation_mode());

	store.handle_key(&KeyEvent::char('h'));
	assert!(store.selected().unwrap().regions().get(&a).unwrap().hidden);

	store.handle_key(&KeyEvent::plain(KeyCode::Backspace));
	let c = store.selected().unwrap();
	assert!(!c.regions().contains(&a));
	assert_eq!(c.highlighted(), None);
	assert_eq!(c.focus(), &Focus::Input("text".into()));

	assert!(c.regions().contains(&b));

	store.handle_key(&key(KeyCode::Backspace, Modifiers::CTRL));
	assert!(store.selected().unwrap().regions().is_empty());
}

#[test]
#[serial]
fn initialize_store_loads_results() {
	hotkeys::reset();
	registry::reset_tags();
	let events = Recorder::default();
	let mut store = AppStore::new(spans())
		.with_task(Some(task()))
		.with_events(events.clone());
	store.after_create().unwrap();

	let payload = InitPayload::from_json(
		&json!({
			"completions": [{
				"id": 41,
				"result": [
					{ "type": "labels", "id": "r1", "from_name": "label", "to_name": "text",
					  "value": { "start": 0, "end": 3, "labels": ["PER"] } },
					{ "type": "labels", "id": "r2", "from_name": "label", "to_name": "text",
					  "value": { "start": 12, "end": 17, "labels": ["ORG"] } },
					{ "type": "relation", "from_id": "r1", "to_id": "r2" },
					{ "type": "choices", "from_name": "nope", "to_name": "text",
					  "value": { "choices": ["x"] } }
				]
			}],
			"predictions": [{ "id": "p", "result": [] }]
		})
		.to_string(),
	)
	.unwrap();
	store.initialize_store(&payload).unwrap();
	assert_eq!(events.take(), ["load"]);

	let c = store.selected().unwrap();
	assert_eq!(c.pk(), Some("41"));
	assert_eq!(c.regions().len(), 2);
	assert_eq!(c.relations().len(), 1);
	assert!(!c.can_undo());
	assert_eq!(c.serialize().len(), 3);
	assert!(matches!(&c.serialize()[2], ResultItem::Relation(r) if r.from_id.as_str() == "r1"));
	assert_eq!(store.completion_store().predictions().len(), 1);
	assert_eq!(store.completion_store().predictions()[0].pk(), Some("p"));
}

#[test]
#[serial]
fn empty_payload_creates_an_initial_completion() {
	let (store, _) = app(fruits("single"), &[]);
	let c = store.selected().unwrap();
	assert!(c.user_generate());
	assert!(c.editable());
	assert_eq!(store.completion_store().completions().len(), 1);
}

#[test]
#[serial]
fn default_bindings_are_listed() {
	let (_store, _) = app(fruits("single"), &["skip"]);
	let combos: Vec<String> = hotkeys::bindings().into_iter().map(|(c, _)| c).collect();
	assert!(combos.starts_with(&["ctrl+enter".to_owned(), "ctrl+space".to_owned()]));
	assert!(combos.contains(&"shift+f".to_owned()));
	assert!(!combos.contains(&"alt+enter".to_owned()));
}

#[test]
#[serial]
fn render_follows_the_selection() {
	let (mut store, _) = app(fruits("single"), &[]);
	store.handle_key(&KeyEvent::char('1'));
	let Widget::Container { children } = store.render() else {
		panic!("root renders as container");
	};
	let Widget::Container { children: options } = &children[2] else {
		panic!("choices render as container");
	};
	assert!(matches!(&options[0], Widget::Radio { checked: true, .. }));
}
