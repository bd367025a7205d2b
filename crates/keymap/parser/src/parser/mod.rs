//! # Parser
//!
//! Recursive descent over plain-text hotkey combos such as `"ctrl+enter"` or
//! `"alt+shift+f2"`.
//!
//! ## Supported Syntax
//!
//! ```text
//! list      = combo ("," combo)*
//! combo     = (modifier "+")* key
//! modifier  = "ctrl" | "control" | "alt" | "option" | "shift" | "cmd" | "meta"
//! key       = fn-key | named-key | char
//! fn-key    = "f" digit digit?
//! named-key = "enter" | "escape" | "backspace" | "space" | ...
//! char      = ascii-char
//! ```
//!
//! Matching is case-insensitive; surrounding whitespace is ignored.

use std::str::FromStr;

use crate::node::{KEY_SEP, Key, Modifier, Node};


/// Function pointer type for parser combinators.
type ParserFn<T> = fn(&mut Parser) -> Result<Option<T>, ParseError>;

/// Represents an error that occurred during parsing.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Parse error at position {}: {}", self.position, self.message)
	}
}

impl std::error::Error for ParseError {}

/// Maintains the parser's state for recursive descent parsing.
struct Parser<'a> {
	/// The remaining input.
	input: &'a str,
	/// Current byte position in the original input.
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	fn peek_at(&self, n: usize) -> Option<char> {
		self.input.chars().nth(n)
	}

	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.position += ch.len_utf8();
		self.input = &self.input[ch.len_utf8()..];
		Some(ch)
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	/// Consumes the next character if it matches the expected one.
	fn take(&mut self, expected: char) -> Result<(), ParseError> {
		match self.next() {
			Some(ch) if ch == expected => Ok(()),
			Some(ch) => Err(ParseError {
				message: format!("expected '{expected}', found '{ch}'"),
				position: self.position - ch.len_utf8(),
			}),
			None => Err(ParseError {
				message: format!("expected '{expected}', found end of input"),
				position: self.position,
			}),
		}
	}

	/// Runs `f`, restoring the parser state if it fails or yields nothing.
	fn try_parse<T, F>(&mut self, f: F) -> Result<Option<T>, ParseError>
	where
		F: FnOnce(&mut Parser<'a>) -> Result<Option<T>, ParseError>,
	{
		let snapshot = (self.input, self.position);
		match f(self) {
			Ok(Some(val)) => Ok(Some(val)),
			Ok(None) | Err(_) => {
				self.input = snapshot.0;
				self.position = snapshot.1;
				Ok(None)
			}
		}
	}

	fn take_while<F>(&mut self, predicate: F) -> String
	where
		F: Fn(char) -> bool,
	{
		let mut result = String::new();
		while let Some(ch) = self.peek() {
			if !predicate(ch) {
				break;
			}
			result.push(ch);
			self.next();
		}
		result
	}

	/// Tries each parser in turn and returns the first success.
	fn alt<T>(&mut self, parsers: &[ParserFn<T>]) -> Result<Option<T>, ParseError> {
		for p in parsers {
			if let Some(value) = p(self)? {
				return Ok(Some(value));
			}
		}
		Ok(None)
	}

	fn error(&self, message: String) -> ParseError {
		ParseError {
			message,
			position: self.position,
		}
	}
}

/// Parses a single combo into a normalized [`Node`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the input does not match the grammar.
pub fn parse(s: &str) -> Result<Node, ParseError> {
	let trimmed = s.trim();
	if trimmed.is_empty() {
		return Err(ParseError {
			message: "empty key combo".to_string(),
			position: 0,
		});
	}

	let mut parser = Parser::new(trimmed);
	let node = parse_node(&mut parser)?;

	if let Some(ch) = parser.peek() {
		return Err(parser.error(format!("expected end of input, found: {ch}")));
	}
	debug_assert!(parser.is_end());

	Ok(node)
}

/// Parses a comma-separated list of combos (`"ctrl+z, cmd+z"`).
///
/// A trailing or doubled comma is an error; `,` itself cannot be bound
/// through a list.
pub fn parse_list(s: &str) -> Result<Vec<Node>, ParseError> {
	s.split(',').map(parse).collect()
}

/// Grammar: `combo = (modifier "+")* key`
fn parse_node(parser: &mut Parser) -> Result<Node, ParseError> {
	let mut modifiers = 0u8;

	for _ in 0..Modifier::ALL.len() {
		match try_parse_modifier(parser)? {
			Some(modifier) => modifiers |= modifier as u8,
			None => break,
		}
	}

	let key = parse_key(parser)?;
	Ok(Node::new(modifiers, key))
}

/// Attempts to parse a modifier followed by the separator.
fn try_parse_modifier(parser: &mut Parser) -> Result<Option<Modifier>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		let Ok(modifier) = name.parse::<Modifier>() else {
			return Ok(None);
		};

		p.take(KEY_SEP)?;

		if p.is_end() {
			return Err(p.error("expected a key after modifier".to_string()));
		}

		Ok(Some(modifier))
	})
}

fn parse_key(parser: &mut Parser) -> Result<Key, ParseError> {
	match parser.alt(&[try_parse_fn_key, try_parse_named_key, try_parse_char])? {
		Some(key) => Ok(key),
		None => Err(parser.error("expected a valid key".to_string())),
	}
}

/// Attempts to parse a function key (`"f1"` to `"f24"`).
///
/// Only activates on `f` followed by a digit; after that the number must be
/// in range or the combo is rejected.
fn try_parse_fn_key(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	if !matches!(parser.peek(), Some('f' | 'F')) {
		return Ok(None);
	}
	if !matches!(parser.peek_at(1), Some(ch) if ch.is_ascii_digit()) {
		return Ok(None);
	}

	parser.next();
	let num = parser.take_while(|ch| ch.is_ascii_digit());

	match num.parse::<u8>() {
		Ok(n) if (1..=24).contains(&n) => Ok(Some(Key::F(n))),
		_ => Err(parser.error("invalid function key number (must be 1-24)".to_string())),
	}
}

fn try_parse_named_key(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		if name.len() < 2 {
			return Ok(None);
		}
		Ok(name.parse::<Key>().ok())
	})
}

fn try_parse_char(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	match parser.peek() {
		Some(ch) if ch.is_ascii() && !ch.is_ascii_control() => {
			parser.next();
			Ok(Some(Key::Char(ch)))
		}
		_ => Ok(None),
	}
}

impl FromStr for Node {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
