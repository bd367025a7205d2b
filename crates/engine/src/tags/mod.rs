//! Tag models.
//!
//! Every element of a configuration becomes a [`TagNode`]. The fields shared
//! by all tags live on the node; the variant-specific state lives in
//! [`TagKind`]. Each tag type has a zero-sized descriptor implementing
//! [`TagModel`], which is what the registry stores.

pub mod attrs;
mod choice;
mod filter;
mod group;
mod object;
mod pdf;

use annotix_keymap_parser::Node;
use annotix_primitives::NodeId;

pub use attrs::Attrs;
pub use choice::{Choice, Label, Selectable};
pub use filter::{Filter, FilterTag};
pub use group::{ChoiceMode, Choices, Labels, SelectGroup};
pub use object::{Text, View};
pub use pdf::{DocumentViewer, Pdf, PdfTag, document_source, open_documents};

use crate::error::AttrError;

/// Capability shared by every tag type: a registered name and a constructor
/// from coerced attributes.
pub trait TagModel {
	/// Lowercase tag-type name, as registered.
	const TYPE: &'static str;

	/// Builds the variant state for one configuration element.
	fn construct(attrs: &Attrs) -> Result<TagKind, AttrError>;
}

/// Variant-specific state of a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagKind {
	View,
	Text,
	Choices(SelectGroup),
	Choice(Selectable),
	Labels(SelectGroup),
	Label(Selectable),
	Filter(FilterTag),
	Pdf(PdfTag),
}

impl TagKind {
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::View => View::TYPE,
			Self::Text => Text::TYPE,
			Self::Choices(_) => Choices::TYPE,
			Self::Choice(_) => Choice::TYPE,
			Self::Labels(_) => Labels::TYPE,
			Self::Label(_) => Label::TYPE,
			Self::Filter(_) => Filter::TYPE,
			Self::Pdf(_) => Pdf::TYPE,
		}
	}

	pub fn as_group(&self) -> Option<&SelectGroup> {
		match self {
			Self::Choices(group) | Self::Labels(group) => Some(group),
			_ => None,
		}
	}

	pub fn as_group_mut(&mut self) -> Option<&mut SelectGroup> {
		match self {
			Self::Choices(group) | Self::Labels(group) => Some(group),
			_ => None,
		}
	}

	pub fn as_selectable(&self) -> Option<&Selectable> {
		match self {
			Self::Choice(sel) | Self::Label(sel) => Some(sel),
			_ => None,
		}
	}

	pub fn as_selectable_mut(&mut self) -> Option<&mut Selectable> {
		match self {
			Self::Choice(sel) | Self::Label(sel) => Some(sel),
			_ => None,
		}
	}

	pub fn as_filter(&self) -> Option<&FilterTag> {
		match self {
			Self::Filter(filter) => Some(filter),
			_ => None,
		}
	}

	pub fn as_filter_mut(&mut self) -> Option<&mut FilterTag> {
		match self {
			Self::Filter(filter) => Some(filter),
			_ => None,
		}
	}

	/// Object tags own regions and are the targets of `toname` references.
	pub fn is_object(&self) -> bool {
		matches!(self, Self::Text | Self::Pdf(_))
	}

	/// Whether a selectable of this kind belongs to a group of `group` kind.
	pub(crate) fn belongs_to(&self, group: &TagKind) -> bool {
		matches!(
			(self, group),
			(Self::Choice(_), Self::Choices(_)) | (Self::Label(_), Self::Labels(_))
		)
	}
}

/// One node of a tag tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
	pub id: NodeId,
	/// Lowercase tag-type name.
	pub tag_name: String,
	pub name: Option<String>,
	pub visible: bool,
	/// Raw `value` attribute.
	pub value: Option<String>,
	/// `value` after `$key` resolution against the task data.
	pub resolved: String,
	pub hotkey: Option<Node>,
	pub disable_hotkey: bool,
	pub parent: Option<NodeId>,
	pub children: Vec<NodeId>,
	pub kind: TagKind,
}

impl TagNode {
	pub fn is_selected(&self) -> bool {
		self.kind.as_selectable().is_some_and(|sel| sel.selected)
	}

	/// Value written to results: the alias when set, else the resolved value.
	pub fn result_value(&self) -> &str {
		self.kind
			.as_selectable()
			.and_then(|sel| sel.alias.as_deref())
			.unwrap_or(&self.resolved)
	}

	/// Hotkey that should fire for this node, honoring `disablehotkey`.
	pub fn active_hotkey(&self) -> Option<Node> {
		if self.disable_hotkey { None } else { self.hotkey }
	}
}
