use tracing::debug;

use super::{Attrs, TagKind, TagModel, TagNode};
use crate::error::AttrError;
use crate::task::Task;
use crate::tree::TagTree;

/// External renderer that displays a document.
pub trait DocumentViewer {
	fn open(&mut self, src: &str);
}

/// State of a `<Pdf>` object. The document itself lives in the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfTag;

/// `<Pdf>`
pub struct Pdf;

impl TagModel for Pdf {
	const TYPE: &'static str = "pdf";

	fn construct(_attrs: &Attrs) -> Result<TagKind, AttrError> {
		Ok(TagKind::Pdf(PdfTag))
	}
}

/// Source of the document shown by a `<Pdf>` node.
///
/// Falls back to the task data itself when `value` resolved to nothing and the
/// data is a plain string.
pub fn document_source(node: &TagNode, task: Option<&Task>) -> Option<String> {
	if !node.resolved.is_empty() {
		return Some(node.resolved.clone());
	}
	task.and_then(|t| t.data.as_str()).map(str::to_owned)
}

/// Hands every `<Pdf>` document of `tree` to `viewer`.
pub fn open_documents(tree: &TagTree, task: Option<&Task>, viewer: &mut dyn DocumentViewer) {
	for node in tree.iter().filter(|n| matches!(n.kind, TagKind::Pdf(_))) {
		match document_source(node, task) {
			Some(src) => viewer.open(&src),
			None => debug!(node = %node.id, "pdf has no document source"),
		}
	}
}
