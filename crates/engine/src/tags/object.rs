use super::{Attrs, TagKind, TagModel};
use crate::error::AttrError;

/// `<View>`: layout container.
pub struct View;

impl TagModel for View {
	const TYPE: &'static str = "view";

	fn construct(_attrs: &Attrs) -> Result<TagKind, AttrError> {
		Ok(TagKind::View)
	}
}

/// `<Text>`: a text object whose value comes from the task.
pub struct Text;

impl TagModel for Text {
	const TYPE: &'static str = "text";

	fn construct(_attrs: &Attrs) -> Result<TagKind, AttrError> {
		Ok(TagKind::Text)
	}
}
