//! Attribute coercion.
//!
//! Configuration attributes arrive as strings. [`Attrs`] lowercases their
//! names and converts values to the types each tag model expects.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::AttrError;

/// Case-insensitive view over a node's configuration attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
	map: BTreeMap<String, String>,
}

impl Attrs {
	pub fn new<'a>(raw: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
		let map = raw
			.into_iter()
			.map(|(k, v)| (k.trim().to_ascii_lowercase(), v.clone()))
			.collect();
		Self { map }
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.map.get(name).map(String::as_str)
	}

	/// Returns the first attribute present among `names`.
	pub fn get_any<'n>(&self, names: &[&'n str]) -> Option<(&'n str, &str)> {
		names
			.iter()
			.find_map(|name| self.get(name).map(|value| (*name, value)))
	}

	pub fn string(&self, name: &str) -> Option<String> {
		self.get(name).map(str::to_owned)
	}

	pub fn string_or(&self, name: &str, default: &str) -> String {
		self.get(name).unwrap_or(default).to_owned()
	}

	/// Coerces a boolean attribute; `true`/`false` in any case.
	pub fn bool(&self, name: &str, default: bool) -> Result<bool, AttrError> {
		match self.get(name) {
			None => Ok(default),
			Some(value) => parse_bool(name, value),
		}
	}

	/// Coerces a boolean stored under any of several spellings.
	pub fn bool_any(&self, names: &[&str], default: bool) -> Result<bool, AttrError> {
		match self.get_any(names) {
			None => Ok(default),
			Some((name, value)) => parse_bool(name, value),
		}
	}

	/// Coerces an integer attribute.
	pub fn number<T: FromStr>(&self, name: &str, default: T) -> Result<T, AttrError> {
		let Some(value) = self.get(name) else {
			return Ok(default);
		};
		value.trim().parse().map_err(|_| AttrError::InvalidNumber {
			attr: name.to_owned(),
			value: value.to_owned(),
		})
	}

	/// Coerces an attribute through its [`FromStr`] implementation, reporting
	/// `expected` on failure.
	pub fn parse<T: FromStr>(
		&self,
		name: &str,
		default: T,
		expected: &'static str,
	) -> Result<T, AttrError> {
		let Some(value) = self.get(name) else {
			return Ok(default);
		};
		value.trim().parse().map_err(|_| AttrError::InvalidValue {
			attr: name.to_owned(),
			value: value.to_owned(),
			expected,
		})
	}
}

fn parse_bool(name: &str, value: &str) -> Result<bool, AttrError> {
	let value = value.trim();
	if value.eq_ignore_ascii_case("true") {
		Ok(true)
	} else if value.eq_ignore_ascii_case("false") {
		Ok(false)
	} else {
		Err(AttrError::InvalidBool {
			attr: name.to_owned(),
			value: value.to_owned(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn attrs(pairs: &[(&str, &str)]) -> Attrs {
		let raw: BTreeMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Attrs::new(&raw)
	}

	#[test]
	fn names_are_case_insensitive() {
		let a = attrs(&[("toName", "text"), ("minLength", "5")]);
		assert_eq!(a.get("toname"), Some("text"));
		assert_eq!(a.number("minlength", 3usize), Ok(5));
	}

	#[test]
	fn coerces_booleans() {
		let a = attrs(&[("cleanup", "FALSE"), ("autofocus", "yes")]);
		assert_eq!(a.bool("cleanup", true), Ok(false));
		assert_eq!(a.bool("missing", true), Ok(true));
		assert!(matches!(
			a.bool("autofocus", false),
			Err(AttrError::InvalidBool { .. })
		));
	}

	#[test]
	fn alternate_spellings() {
		let a = attrs(&[("caseSensetive", "true")]);
		assert_eq!(a.bool_any(&["casesensitive", "casesensetive"], false), Ok(true));
	}

	#[test]
	fn get_any_returns_the_matching_name() {
		let names = ["to", "toname"];
		let found = {
			let a = attrs(&[("toName", "text")]);
			a.get_any(&names).map(|(name, value)| (name, value.to_owned()))
		};
		assert_eq!(found, Some(("toname", "text".to_owned())));
	}

	#[test]
	fn rejects_bad_numbers() {
		let a = attrs(&[("minlength", "three")]);
		assert_eq!(
			a.number("minlength", 3usize),
			Err(AttrError::InvalidNumber {
				attr: "minlength".into(),
				value: "three".into()
			})
		);
	}
}
