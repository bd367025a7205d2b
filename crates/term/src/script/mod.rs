//! Session scripts.
//!
//! One action per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! key shift+f          # one or more combos
//! type apple pie       # typed characters
//! click Apple          # click the option with this value
//! region a1 text 0 3   # add region a1 on object `text` spanning 0..3
//! highlight a1
//! relation a1 b2
//! undo
//! redo
//! submit
//! update
//! skip
//! ```

use annotix_keymap_parser::{Node, ParseError, parse};
use annotix_primitives::RegionId;
use thiserror::Error;


/// One scripted user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
	Key(Vec<Node>),
	Type(String),
	Click(String),
	Region {
		id: RegionId,
		object: String,
		span: Option<(u64, u64)>,
	},
	Highlight(RegionId),
	Relation(RegionId, RegionId),
	Undo,
	Redo,
	Submit,
	Update,
	Skip,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
	#[error("line {line}: unknown action '{action}'")]
	UnknownAction { line: usize, action: String },
	#[error("line {line}: '{action}' expects {expected}")]
	Arguments {
		line: usize,
		action: &'static str,
		expected: &'static str,
	},
	#[error("line {line}: invalid key combo")]
	Combo {
		line: usize,
		#[source]
		source: ParseError,
	},
}

/// Parses a whole script.
pub fn parse_script(source: &str) -> Result<Vec<Action>, ScriptError> {
	source
		.lines()
		.enumerate()
		.filter_map(|(i, line)| {
			let line_no = i + 1;
			let line = line.split_once('#').map_or(line, |(code, _)| code).trim();
			(!line.is_empty()).then(|| parse_line(line_no, line))
		})
		.collect()
}

/// Parses key combos given on the command line.
pub fn parse_keys<S: AsRef<str>>(combos: &[S]) -> Result<Action, ScriptError> {
	combos
		.iter()
		.map(|c| parse(c.as_ref()).map_err(|source| ScriptError::Combo { line: 0, source }))
		.collect::<Result<Vec<_>, _>>()
		.map(Action::Key)
}

fn parse_line(line: usize, text: &str) -> Result<Action, ScriptError> {
	let (action, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
	let rest = rest.trim();
	let args: Vec<&str> = rest.split_whitespace().collect();
	let arity = |name: &'static str, expected: &'static str| ScriptError::Arguments {
		line,
		action: name,
		expected,
	};

	match action {
		"key" => {
			if args.is_empty() {
				return Err(arity("key", "at least one combo"));
			}
			args.iter()
				.map(|c| parse(c).map_err(|source| ScriptError::Combo { line, source }))
				.collect::<Result<Vec<_>, _>>()
				.map(Action::Key)
		}
		// Text keeps inner spaces verbatim.
		"type" if !rest.is_empty() => Ok(Action::Type(rest.to_owned())),
		"type" => Err(arity("type", "text")),
		"click" if !rest.is_empty() => Ok(Action::Click(rest.to_owned())),
		"click" => Err(arity("click", "an option value")),
		"region" => match args.as_slice() {
			[id, object] => Ok(Action::Region {
				id: RegionId::from(*id),
				object: (*object).to_owned(),
				span: None,
			}),
			[id, object, start, end] => {
				let span = start.parse().ok().zip(end.parse().ok());
				match span {
					Some(span) => Ok(Action::Region {
						id: RegionId::from(*id),
						object: (*object).to_owned(),
						span: Some(span),
					}),
					None => Err(arity("region", "numeric start and end offsets")),
				}
			}
			_ => Err(arity("region", "an id, an object name and an optional span")),
		},
		"highlight" => match args.as_slice() {
			[id] => Ok(Action::Highlight(RegionId::from(*id))),
			_ => Err(arity("highlight", "a region id")),
		},
		"relation" => match args.as_slice() {
			[from, to] => Ok(Action::Relation(RegionId::from(*from), RegionId::from(*to))),
			_ => Err(arity("relation", "two region ids")),
		},
		"undo" => Ok(Action::Undo),
		"redo" => Ok(Action::Redo),
		"submit" => Ok(Action::Submit),
		"update" => Ok(Action::Update),
		"skip" => Ok(Action::Skip),
		other => Err(ScriptError::UnknownAction {
			line,
			action: other.to_owned(),
		}),
	}
}
