//! Hotkey combo grammar.
//!
//! Combos are written the way annotation configs write them: `"ctrl+enter"`,
//! `"alt+s"`, `"h"`. Parsing yields a [`Node`] whose [`Display`](std::fmt::Display)
//! output is the canonical form used as the dispatch key, so `"Ctrl+Z"` and
//! `"ctrl+z"` address the same binding.

mod node;
mod parser;

pub use node::{KEY_SEP, Key, Modifier, Node};
pub use parser::{ParseError, parse, parse_list};
