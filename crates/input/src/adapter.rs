use annotix_keymap_parser::{Key as ParserKey, Modifier, Node};
use annotix_primitives::{KeyCode, KeyEvent, Modifiers};

/// Normalizes an incoming key event into the combo format used at registration.
pub fn key_to_node(event: &KeyEvent) -> Node {
	Node::new(modifiers_to_parser(&event.modifiers), key_to_parser(event.code))
}

/// Builds the key event a combo describes, for scripted input.
pub fn node_to_key(node: &Node) -> KeyEvent {
	let modifiers = Modifiers {
		ctrl: node.has(Modifier::Ctrl),
		alt: node.has(Modifier::Alt),
		shift: node.has(Modifier::Shift),
		cmd: node.has(Modifier::Cmd),
	};
	KeyEvent::new(parser_to_key(node.key), modifiers)
}

fn parser_to_key(key: ParserKey) -> KeyCode {
	match key {
		ParserKey::BackTab => KeyCode::BackTab,
		ParserKey::Backspace => KeyCode::Backspace,
		ParserKey::Char(c) => KeyCode::Char(c),
		ParserKey::Delete => KeyCode::Delete,
		ParserKey::Down => KeyCode::Down,
		ParserKey::End => KeyCode::End,
		ParserKey::Enter => KeyCode::Enter,
		ParserKey::Esc => KeyCode::Esc,
		ParserKey::F(n) => KeyCode::F(n),
		ParserKey::Home => KeyCode::Home,
		ParserKey::Insert => KeyCode::Insert,
		ParserKey::Left => KeyCode::Left,
		ParserKey::PageDown => KeyCode::PageDown,
		ParserKey::PageUp => KeyCode::PageUp,
		ParserKey::Right => KeyCode::Right,
		ParserKey::Space => KeyCode::Space,
		ParserKey::Tab => KeyCode::Tab,
		ParserKey::Up => KeyCode::Up,
	}
}

fn key_to_parser(code: KeyCode) -> ParserKey {
	match code {
		KeyCode::BackTab => ParserKey::BackTab,
		KeyCode::Backspace => ParserKey::Backspace,
		KeyCode::Char(' ') => ParserKey::Space,
		KeyCode::Char(c) => ParserKey::Char(c),
		KeyCode::Delete => ParserKey::Delete,
		KeyCode::Down => ParserKey::Down,
		KeyCode::End => ParserKey::End,
		KeyCode::Enter => ParserKey::Enter,
		KeyCode::Esc => ParserKey::Esc,
		KeyCode::F(n) => ParserKey::F(n),
		KeyCode::Home => ParserKey::Home,
		KeyCode::Insert => ParserKey::Insert,
		KeyCode::Left => ParserKey::Left,
		KeyCode::PageDown => ParserKey::PageDown,
		KeyCode::PageUp => ParserKey::PageUp,
		KeyCode::Right => ParserKey::Right,
		KeyCode::Space => ParserKey::Space,
		KeyCode::Tab => ParserKey::Tab,
		KeyCode::Up => ParserKey::Up,
	}
}

fn modifiers_to_parser(mods: &Modifiers) -> u8 {
	let mut result: u8 = 0;
	if mods.ctrl {
		result |= Modifier::Ctrl as u8;
	}
	if mods.alt {
		result |= Modifier::Alt as u8;
	}
	if mods.shift {
		result |= Modifier::Shift as u8;
	}
	if mods.cmd {
		result |= Modifier::Cmd as u8;
	}
	result
}
