//! Modifier state carried by incoming key events.

/// Held modifiers. Combos such as `ctrl+enter` or `alt+s` match on the exact
/// set, so `shift` matters for letters as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	pub ctrl: bool,
	pub alt: bool,
	pub shift: bool,
	/// Command on macOS, Super elsewhere.
	pub cmd: bool,
}

impl Modifiers {
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		cmd: false,
	};

	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };
	pub const ALT: Self = Self { alt: true, ..Self::NONE };
	pub const SHIFT: Self = Self { shift: true, ..Self::NONE };
	pub const CMD: Self = Self { cmd: true, ..Self::NONE };

	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Whether the event is a command chord rather than text input.
	///
	/// Shift alone still types; Ctrl, Alt or Cmd turn a key into a command
	/// that a focused filter forwards instead of editing its query.
	pub fn is_command(self) -> bool {
		self.ctrl || self.alt || self.cmd
	}

	pub fn is_empty(self) -> bool {
		!self.is_command() && !self.shift
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shift_is_not_a_command() {
		assert!(!Modifiers::SHIFT.is_command());
		assert!(Modifiers::CMD.is_command());
		assert!(Modifiers::NONE.alt().is_command());
		assert!(Modifiers::NONE.is_empty());
		assert!(!Modifiers::SHIFT.is_empty());
	}
}
