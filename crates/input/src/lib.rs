//! Hotkey table and key-event dispatch.
//!
//! A [`HotkeyTable`] maps canonical key combos to handlers over some context
//! type `C`. The table holds no per-annotation state: handlers receive the
//! context at dispatch time and resolve whatever is current there.
//!
//! Dispatch isolates failures. A handler that returns an error or panics is
//! logged and reported as [`Dispatch::Failed`]; the table and every other
//! binding stay usable for later events.

mod adapter;
mod table;

pub use adapter::{key_to_node, node_to_key};
pub use annotix_keymap_parser::{Node, ParseError};
pub use table::{Binding, Dispatch, HotkeyHandler, HotkeyTable, invoke};
