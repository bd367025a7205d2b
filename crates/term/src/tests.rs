use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;
use tempfile::NamedTempFile;

use crate::cli::Inputs;
use crate::events::Event;
use crate::script::{Action, parse_script};
use crate::session::{self, Session, SessionOptions};

const FRUITS: &str = r#"{
	"tagName": "View",
	"children": [
		{ "tagName": "Text", "attributes": { "name": "text", "value": "$text" } },
		{ "tagName": "Filter", "attributes": { "name": "filter", "toName": "fruit", "hotkey": "shift+f" } },
		{
			"tagName": "Choices",
			"attributes": { "name": "fruit", "toName": "text", "required": "true" },
			"children": [
				{ "tagName": "Choice", "attributes": { "value": "Apple", "hotkey": "1" } },
				{ "tagName": "Choice", "attributes": { "value": "Banana", "hotkey": "2" } },
				{ "tagName": "Choice", "attributes": { "value": "apple pie" } }
			]
		}
	]
}"#;

const SPANS: &str = r#"{
	"tagName": "View",
	"children": [
		{
			"tagName": "Labels",
			"attributes": { "name": "label", "toName": "text" },
			"children": [
				{ "tagName": "Label", "attributes": { "value": "PER" } },
				{ "tagName": "Label", "attributes": { "value": "ORG" } }
			]
		},
		{ "tagName": "Text", "attributes": { "name": "text", "value": "$text" } }
	]
}"#;

const TASK: &str = r#"{ "id": 7, "data": { "text": "Ann eats an apple" } }"#;

fn file(contents: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

fn inputs(config: &NamedTempFile, task: &NamedTempFile) -> Inputs {
	Inputs {
		config: config.path().to_path_buf(),
		task: Some(task.path().to_path_buf()),
		lenient: false,
	}
}

fn session(config: &str, interfaces: &[&str]) -> Session {
	let (config_file, task_file) = (file(config), file(TASK));
	let (config, task) = session::load_inputs(&inputs(&config_file, &task_file)).unwrap();
	let mut session = Session::new(
		config,
		task,
		SessionOptions {
			interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
			..SessionOptions::default()
		},
	)
	.unwrap();
	session.load(&Default::default()).unwrap();
	session
}

#[test]
fn load_inputs_reports_missing_files() {
	let inputs = Inputs {
		config: PathBuf::from("/nonexistent/annotix/config.json"),
		task: None,
		lenient: false,
	};
	let err = session::load_inputs(&inputs).unwrap_err();
	assert!(err.to_string().contains("config.json"), "{err}");
}

#[test]
#[serial]
fn check_summarizes_tree() {
	let (config_file, task_file) = (file(FRUITS), file(TASK));
	let (config, task) = session::load_inputs(&inputs(&config_file, &task_file)).unwrap();
	let report = session::check(&config, task.as_ref(), false).unwrap();

	assert_eq!(report.nodes, 7);
	assert_eq!(report.names, ["filter", "fruit", "text"]);
	assert_eq!(report.groups.len(), 1);
	assert_eq!(report.groups[0].mode, "single");
	assert_eq!(report.groups[0].options, ["Apple", "Banana", "apple pie"]);
	let combos: Vec<_> = report.hotkeys.iter().map(|h| (h.combo.as_str(), h.value.as_str())).collect();
	assert_eq!(combos, [("shift+f", "filter"), ("1", "Apple"), ("2", "Banana")]);
	assert!(report.unresolved.is_empty());
}

#[test]
#[serial]
fn check_lenient_lists_dangling_references() {
	let config = annotix_engine::ConfigNode::from_json(
		r#"{ "tagName": "View", "children": [
			{ "tagName": "Choices", "attributes": { "name": "c", "toName": "missing" },
			  "children": [ { "tagName": "Choice", "attributes": { "value": "a" } } ] }
		] }"#,
	)
	.unwrap();
	assert!(session::check(&config, None, false).is_err());
	let report = session::check(&config, None, true).unwrap();
	assert_eq!(report.unresolved, [r#"choices toname="missing""#]);
}

#[test]
#[serial]
fn filter_script_selects_and_submits() {
	let mut session = session(FRUITS, &[]);
	let actions = parse_script("key shift+f\ntype app\nkey enter\nsubmit").unwrap();
	session.run(&actions).unwrap();

	let report = session.report(false);
	let expected = json!([
		{ "type": "choices", "from_name": "fruit", "to_name": "text", "value": { "choices": ["Apple"] } }
	]);
	assert_eq!(serde_json::to_value(&report.result).unwrap(), expected);
	assert_eq!(report.events.len(), 2);
	assert_eq!(report.events[0], Event::Load);
	assert!(matches!(&report.events[1], Event::Submit { task: Some(7), result } if result.len() == 1));
	assert!(report.can_undo);
	assert!(report.widget.is_none());
}

#[test]
#[serial]
fn required_group_blocks_submit() {
	let mut session = session(FRUITS, &[]);
	session.run(&[Action::Submit]).unwrap();
	let events = session.report(false).events;
	assert_eq!(
		events,
		[
			Event::Load,
			Event::Alert {
				message: "Checkbox \"fruit\" is required.".into()
			}
		]
	);

	session.run(&parse_script("key 2\nkey ctrl+enter").unwrap()).unwrap();
	let report = session.report(false);
	assert!(matches!(&report.events[..], [Event::Submit { .. }]));
	let result = serde_json::to_value(&report.result).unwrap();
	assert_eq!(result[0]["value"], json!({ "choices": ["Banana"] }));
}

#[test]
#[serial]
fn region_labels_and_undo() {
	let mut session = session(SPANS, &[]);
	let script = "region a1 text 0 3\nhighlight a1\nclick PER";
	session.run(&parse_script(script).unwrap()).unwrap();

	let report = session.report(false);
	let expected = json!([{
		"type": "labels",
		"id": "a1",
		"from_name": "label",
		"to_name": "text",
		"value": { "start": 0, "end": 3, "labels": ["PER"] }
	}]);
	assert_eq!(serde_json::to_value(&report.result).unwrap(), expected);

	session.run(&[Action::Undo]).unwrap();
	let report = session.report(false);
	assert!(report.result.is_empty());
	assert!(report.can_redo);

	session.run(&[Action::Redo]).unwrap();
	assert_eq!(serde_json::to_value(&session.report(false).result).unwrap(), expected);
}

#[test]
#[serial]
fn unknown_targets_fail_the_run() {
	let mut session = session(SPANS, &[]);
	assert!(session.run(&parse_script("highlight nope").unwrap()).is_err());
	assert!(session.run(&parse_script("click Nothing").unwrap()).is_err());
	assert!(session.run(&parse_script("region a1 label").unwrap()).is_err());
}

#[test]
#[serial]
fn bindings_follow_interfaces() {
	let plain = session(FRUITS, &[]).bindings();
	assert!(plain.iter().all(|b| b.combo != "ctrl+space"));

	let with_skip = session(FRUITS, &["skip"]).bindings();
	assert!(with_skip.iter().any(|b| b.combo == "ctrl+space"));
	let tag = with_skip.iter().find(|b| b.combo == "1").unwrap();
	assert_eq!(tag.description.as_deref(), Some("choice Apple"));
}

#[test]
#[serial]
fn skip_reports_task_and_render_is_optional() {
	let mut session = session(FRUITS, &["skip"]);
	session.run(&parse_script("key ctrl+space").unwrap()).unwrap();
	let report = session.report(true);
	assert_eq!(report.events, [Event::Load, Event::Skip { task: Some(7) }]);
	assert!(report.widget.is_some());
}
