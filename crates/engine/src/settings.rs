//! User settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Per-user interface preferences, loaded from TOML.
///
/// ```toml
/// enable_hotkeys = true
/// enable_tooltips = false
/// fullscreen = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Global hotkeys are dispatched. The focused filter works regardless.
	pub enable_hotkeys: bool,
	/// Hotkey hints on choices.
	pub enable_tooltips: bool,
	/// Hotkey hints on labels.
	pub enable_label_tooltips: bool,
	pub fullscreen: bool,
	/// Show label text on regions.
	pub show_labels: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			enable_hotkeys: true,
			enable_tooltips: false,
			enable_label_tooltips: true,
			fullscreen: false,
			show_labels: false,
		}
	}
}

impl Settings {
	pub fn from_toml(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn load(path: &Path) -> Result<Self, SettingsError> {
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml(&source)
	}

	pub fn toggle_fullscreen(&mut self) {
		self.fullscreen = !self.fullscreen;
	}

	pub fn toggle_hotkeys(&mut self) {
		self.enable_hotkeys = !self.enable_hotkeys;
	}

	pub fn toggle_tooltips(&mut self) {
		self.enable_tooltips = !self.enable_tooltips;
	}

	pub fn toggle_label_tooltips(&mut self) {
		self.enable_label_tooltips = !self.enable_label_tooltips;
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn missing_keys_keep_defaults() {
		let settings = Settings::from_toml("fullscreen = true").unwrap();
		assert!(settings.fullscreen);
		assert!(settings.enable_hotkeys);
		assert!(settings.enable_label_tooltips);
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "enable_hotkeys = false\nshow_labels = true").unwrap();
		let settings = Settings::load(file.path()).unwrap();
		assert!(!settings.enable_hotkeys);
		assert!(settings.show_labels);
	}

	#[test]
	fn reports_bad_input() {
		assert!(matches!(
			Settings::from_toml("fullscreen = \"yes\""),
			Err(SettingsError::Parse(_))
		));
		assert!(matches!(
			Settings::load(Path::new("/nonexistent/annotix.toml")),
			Err(SettingsError::Io { .. })
		));
	}
}
