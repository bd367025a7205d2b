mod modifiers;

pub use modifiers::Modifiers;

/// Physical key of an incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
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

/// A key press as delivered by the host event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl KeyEvent {
	pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// An unmodified key press.
	pub fn plain(code: KeyCode) -> Self {
		Self::new(code, Modifiers::NONE)
	}

	/// An unmodified printable character.
	pub fn char(ch: char) -> Self {
		Self::plain(KeyCode::Char(ch))
	}

	/// Returns the character this event types into a text input, if any.
	///
	/// Events carrying Ctrl, Alt or Cmd are commands, not text.
	pub fn text(&self) -> Option<char> {
		if self.modifiers.is_command() {
			return None;
		}
		match self.code {
			KeyCode::Char(ch) if !ch.is_control() => Some(ch),
			KeyCode::Space => Some(' '),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_ignores_command_chords() {
		assert_eq!(KeyEvent::char('a').text(), Some('a'));
		assert_eq!(KeyEvent::plain(KeyCode::Space).text(), Some(' '));
		assert_eq!(KeyEvent::new(KeyCode::Char('s'), Modifiers::ALT).text(), None);
		assert_eq!(KeyEvent::new(KeyCode::Char('A'), Modifiers::SHIFT).text(), Some('A'));
		assert_eq!(KeyEvent::plain(KeyCode::Enter).text(), None);
	}
}
