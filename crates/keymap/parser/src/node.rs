//! Key and combo node types.

use std::fmt;
use std::str::FromStr;

/// Separator between modifiers and the key in a combo string.
pub const KEY_SEP: char = '+';

/// Modifier bit flags, combined into [`Node::modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Modifier {
	Ctrl = 0b0001,
	Alt = 0b0010,
	Shift = 0b0100,
	Cmd = 0b1000,
}

impl Modifier {
	/// Canonical display order.
	pub const ALL: [Modifier; 4] = [Modifier::Ctrl, Modifier::Alt, Modifier::Shift, Modifier::Cmd];

	/// Canonical lowercase name.
	pub fn name(self) -> &'static str {
		match self {
			Modifier::Ctrl => "ctrl",
			Modifier::Alt => "alt",
			Modifier::Shift => "shift",
			Modifier::Cmd => "cmd",
		}
	}
}

impl FromStr for Modifier {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"ctrl" | "control" => Ok(Modifier::Ctrl),
			"alt" | "option" => Ok(Modifier::Alt),
			"shift" => Ok(Modifier::Shift),
			"cmd" | "command" | "meta" | "super" => Ok(Modifier::Cmd),
			_ => Err(()),
		}
	}
}

/// A key identifier without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	Char(char),
	F(u8),
	Enter,
	Esc,
	Space,
	Tab,
	BackTab,
	Backspace,
	Delete,
	Insert,
	Home,
	End,
	PageUp,
	PageDown,
	Up,
	Down,
	Left,
	Right,
}

impl Key {
	/// Folds ASCII letters to lowercase so combos match case-insensitively.
	pub fn normalized(self) -> Self {
		match self {
			Key::Char(' ') => Key::Space,
			Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
			other => other,
		}
	}
}

impl FromStr for Key {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let key = match s.to_ascii_lowercase().as_str() {
			"enter" | "return" => Key::Enter,
			"esc" | "escape" => Key::Esc,
			"space" => Key::Space,
			"tab" => Key::Tab,
			"backtab" => Key::BackTab,
			"backspace" => Key::Backspace,
			"del" | "delete" => Key::Delete,
			"ins" | "insert" => Key::Insert,
			"home" => Key::Home,
			"end" => Key::End,
			"pageup" => Key::PageUp,
			"pagedown" => Key::PageDown,
			"up" => Key::Up,
			"down" => Key::Down,
			"left" => Key::Left,
			"right" => Key::Right,
			_ => return Err(()),
		};
		Ok(key)
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Char(c) => write!(f, "{c}"),
			Key::F(n) => write!(f, "f{n}"),
			Key::Enter => f.write_str("enter"),
			Key::Esc => f.write_str("escape"),
			Key::Space => f.write_str("space"),
			Key::Tab => f.write_str("tab"),
			Key::BackTab => f.write_str("backtab"),
			Key::Backspace => f.write_str("backspace"),
			Key::Delete => f.write_str("delete"),
			Key::Insert => f.write_str("insert"),
			Key::Home => f.write_str("home"),
			Key::End => f.write_str("end"),
			Key::PageUp => f.write_str("pageup"),
			Key::PageDown => f.write_str("pagedown"),
			Key::Up => f.write_str("up"),
			Key::Down => f.write_str("down"),
			Key::Left => f.write_str("left"),
			Key::Right => f.write_str("right"),
		}
	}
}

/// A single key combo: modifier bits plus a key.
///
/// Constructed values are always normalized, so equality and hashing follow
/// the canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Node {
	/// Bitwise OR of [`Modifier`] values.
	pub modifiers: u8,
	/// The non-modifier key.
	pub key: Key,
}

impl Node {
	/// Creates a normalized combo.
	pub fn new(modifiers: u8, key: Key) -> Self {
		Self {
			modifiers,
			key: key.normalized(),
		}
	}

	/// Returns true if `modifier` is part of this combo.
	pub fn has(&self, modifier: Modifier) -> bool {
		self.modifiers & modifier as u8 != 0
	}
}

impl From<Key> for Node {
	fn from(key: Key) -> Self {
		Node::new(0, key)
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for modifier in Modifier::ALL {
			if self.has(modifier) {
				write!(f, "{}{KEY_SEP}", modifier.name())?;
			}
		}
		write!(f, "{}", self.key)
	}
}

#[cfg(feature = "serde")]
impl TryFrom<String> for Node {
	type Error = crate::ParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		crate::parse(&value)
	}
}

#[cfg(feature = "serde")]
impl From<Node> for String {
	fn from(node: Node) -> Self {
		node.to_string()
	}
}
