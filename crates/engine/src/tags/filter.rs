use annotix_primitives::NodeId;

use super::{Attrs, TagKind, TagModel};
use crate::error::AttrError;

pub const DEFAULT_PLACEHOLDER: &str = "Quick Filter";
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// State of a `<Filter>` input narrowing the options of another group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTag {
	pub query: String,
	pub case_sensitive: bool,
	/// Clear the query once an option has been picked with Enter.
	pub cleanup: bool,
	pub placeholder: String,
	/// Queries shorter than this (in characters) show every option.
	pub min_length: usize,
	pub autofocus: bool,
	/// Name of the input that receives focus after a pick.
	pub next_input: String,
	pub to_name: Option<String>,
	/// Node named by `to_name`, linked by the builder.
	pub target: Option<NodeId>,
}

impl Default for FilterTag {
	fn default() -> Self {
		Self {
			query: String::new(),
			case_sensitive: false,
			cleanup: true,
			placeholder: DEFAULT_PLACEHOLDER.to_owned(),
			min_length: DEFAULT_MIN_LENGTH,
			autofocus: false,
			next_input: String::new(),
			to_name: None,
			target: None,
		}
	}
}

impl FilterTag {
	fn from_attrs(attrs: &Attrs) -> Result<Self, AttrError> {
		Ok(Self {
			query: String::new(),
			case_sensitive: attrs.bool_any(&["casesensetive", "casesensitive"], false)?,
			cleanup: attrs.bool("cleanup", true)?,
			placeholder: attrs.string_or("placeholder", DEFAULT_PLACEHOLDER),
			min_length: attrs.number("minlength", DEFAULT_MIN_LENGTH)?,
			autofocus: attrs.bool("autofocus", false)?,
			next_input: attrs.string_or("nextinput", ""),
			to_name: attrs.string("toname"),
			target: None,
		})
	}

	/// Whether the query is too short to narrow anything.
	pub fn is_short(&self) -> bool {
		self.query.chars().count() < self.min_length
	}

	/// Substring test of the query against an option value.
	pub fn matches(&self, value: &str) -> bool {
		if self.case_sensitive {
			value.contains(self.query.as_str())
		} else {
			value.to_lowercase().contains(&self.query.to_lowercase())
		}
	}
}

/// `<Filter>`
pub struct Filter;

impl TagModel for Filter {
	const TYPE: &'static str = "filter";

	fn construct(attrs: &Attrs) -> Result<TagKind, AttrError> {
		FilterTag::from_attrs(attrs).map(TagKind::Filter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn with_query(query: &str) -> FilterTag {
		FilterTag {
			query: query.to_owned(),
			..FilterTag::default()
		}
	}

	#[test]
	fn short_queries_count_characters() {
		assert!(with_query("ab").is_short());
		assert!(!with_query("abc").is_short());
		assert!(with_query("éé").is_short());
	}

	#[test]
	fn matching_folds_case_unless_sensitive() {
		let mut filter = with_query("APP");
		assert!(filter.matches("apple pie"));
		filter.case_sensitive = true;
		assert!(!filter.matches("apple pie"));
		assert!(filter.matches("APPLE"));
	}
}
