use annotix_primitives::NodeId;

use super::{Attrs, TagKind, TagModel};
use crate::error::AttrError;

/// Selection state shared by `<Choice>` and `<Label>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectable {
	pub selected: bool,
	/// Replaces the value in results.
	pub alias: Option<String>,
	/// Nearest ancestor group of the matching kind, linked by the builder.
	pub group: Option<NodeId>,
}

impl Selectable {
	fn from_attrs(attrs: &Attrs) -> Result<Self, AttrError> {
		Ok(Self {
			selected: attrs.bool("selected", false)?,
			alias: attrs.string("alias"),
			group: None,
		})
	}
}

/// `<Choice>`: one option of a `<Choices>` group.
pub struct Choice;

impl TagModel for Choice {
	const TYPE: &'static str = "choice";

	fn construct(attrs: &Attrs) -> Result<TagKind, AttrError> {
		Selectable::from_attrs(attrs).map(TagKind::Choice)
	}
}

/// `<Label>`: one option of a `<Labels>` group, applied to regions.
pub struct Label;

impl TagModel for Label {
	const TYPE: &'static str = "label";

	fn construct(attrs: &Attrs) -> Result<TagKind, AttrError> {
		Selectable::from_attrs(attrs).map(TagKind::Label)
	}
}
