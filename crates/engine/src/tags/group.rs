use std::fmt;
use std::str::FromStr;

use annotix_primitives::NodeId;

use super::{Attrs, TagKind, TagModel};
use crate::error::AttrError;

/// How the options of a group are presented and selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChoiceMode {
	/// Radio buttons: at most one option selected.
	#[default]
	Single,
	/// Checkboxes.
	Multiple,
	/// Chips.
	Label,
}

impl ChoiceMode {
	/// Whether selecting an option first clears its siblings.
	pub fn should_be_unselected(self) -> bool {
		self == Self::Single
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Single => "single",
			Self::Multiple => "multiple",
			Self::Label => "label",
		}
	}
}

impl FromStr for ChoiceMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"single" | "single-radio" => Ok(Self::Single),
			"multiple" => Ok(Self::Multiple),
			"label" => Ok(Self::Label),
			_ => Err(()),
		}
	}
}

impl fmt::Display for ChoiceMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// State of a `<Choices>` or `<Labels>` group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectGroup {
	/// Name of the object tag this group annotates.
	pub to_name: Option<String>,
	pub mode: ChoiceMode,
	/// Selections are stored per region instead of per task.
	pub per_region: bool,
	pub readonly: bool,
	pub required: bool,
	pub required_message: Option<String>,
	/// Node named by `to_name`, linked by the builder.
	pub target: Option<NodeId>,
	/// Descendant options in pre-order.
	pub tied: Vec<NodeId>,
}

impl SelectGroup {
	fn from_attrs(attrs: &Attrs) -> Result<Self, AttrError> {
		Ok(Self {
			to_name: attrs.string("toname"),
			mode: attrs.parse("choice", ChoiceMode::Single, "single, multiple or label")?,
			per_region: attrs.bool("perregion", false)?,
			readonly: attrs.bool("readonly", false)?,
			required: attrs.bool("required", false)?,
			required_message: attrs.string("requiredmessage"),
			target: None,
			tied: Vec::new(),
		})
	}
}

/// `<Choices>`: a group of classification options.
pub struct Choices;

impl TagModel for Choices {
	const TYPE: &'static str = "choices";

	fn construct(attrs: &Attrs) -> Result<TagKind, AttrError> {
		SelectGroup::from_attrs(attrs).map(TagKind::Choices)
	}
}

/// `<Labels>`: a group of labels applied to regions.
pub struct Labels;

impl TagModel for Labels {
	const TYPE: &'static str = "labels";

	fn construct(attrs: &Attrs) -> Result<TagKind, AttrError> {
		SelectGroup::from_attrs(attrs).map(TagKind::Labels)
	}
}
