//! # pairlink-conf
//!
//! Settings for the client navigation core.
//!
//! Settings come from a TOML document; every key is optional and falls back to
//! the defaults below.
//!
//! ```toml
//! app_name = "Christmas Link"
//! initial_path = "/"
//! navigating_delay_ms = 100
//! not_found_path = "/"
//! ```
//!
//! ## Example
//!
//! ```
//! use pairlink_conf::NavigationSettings;
//!
//! let settings = NavigationSettings::from_toml_str(r#"app_name = "Pairs""#).unwrap();
//! assert_eq!(settings.app_name(), "Pairs");
//! assert_eq!(settings.initial_path(), "/");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default application name used in document titles
pub const DEFAULT_APP_NAME: &str = "Christmas Link";
/// Default path the navigator starts at
pub const DEFAULT_INITIAL_PATH: &str = "/";
/// Default time the navigating flag stays raised
pub const DEFAULT_NAVIGATING_DELAY_MS: u64 = 100;
/// Default target of the not-found recovery action
pub const DEFAULT_NOT_FOUND_PATH: &str = "/";

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("failed to read settings file {path}: {source}")]
	Io {
		/// File that failed to load
		path: String,
		/// Underlying I/O error
		#[source]
		source: std::io::Error,
	},
	/// The document is not valid TOML for these settings.
	#[error("failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
	/// A value parsed but violates a constraint.
	#[error("invalid setting `{key}`: {reason}")]
	Invalid {
		/// Offending key
		key: &'static str,
		/// What is wrong with it
		reason: String,
	},
}

/// Settings consumed by the navigator and the route matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationSettings {
	app_name: String,
	initial_path: String,
	navigating_delay_ms: u64,
	not_found_path: String,
}

impl Default for NavigationSettings {
	fn default() -> Self {
		Self {
			app_name: DEFAULT_APP_NAME.to_string(),
			initial_path: DEFAULT_INITIAL_PATH.to_string(),
			navigating_delay_ms: DEFAULT_NAVIGATING_DELAY_MS,
			not_found_path: DEFAULT_NOT_FOUND_PATH.to_string(),
		}
	}
}

impl NavigationSettings {
	/// Parses and validates settings from a TOML string.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads, parses and validates a TOML settings file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.display().to_string(),
			source,
		})?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), "loaded navigation settings");
		Ok(settings)
	}

	/// Checks the constraints that deserialization alone cannot express.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.app_name.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "app_name",
				reason: "must not be empty".to_string(),
			});
		}
		for (key, value) in [
			("initial_path", &self.initial_path),
			("not_found_path", &self.not_found_path),
		] {
			if !value.starts_with('/') {
				return Err(SettingsError::Invalid {
					key,
					reason: format!("`{value}` must start with `/`"),
				});
			}
		}
		Ok(())
	}

	/// Sets the application name.
	pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
		self.app_name = app_name.into();
		self
	}

	/// Sets the initial path.
	pub fn with_initial_path(mut self, path: impl Into<String>) -> Self {
		self.initial_path = path.into();
		self
	}

	/// Sets how long the navigating flag stays raised.
	pub fn with_navigating_delay(mut self, delay: Duration) -> Self {
		self.navigating_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
		self
	}

	/// Sets the target of the not-found recovery action.
	pub fn with_not_found_path(mut self, path: impl Into<String>) -> Self {
		self.not_found_path = path.into();
		self
	}

	/// Application name appended to document titles.
	pub fn app_name(&self) -> &str {
		&self.app_name
	}

	/// Path the navigator starts at.
	pub fn initial_path(&self) -> &str {
		&self.initial_path
	}

	/// Time the navigating flag stays raised after a navigation.
	pub fn navigating_delay(&self) -> Duration {
		Duration::from_millis(self.navigating_delay_ms)
	}

	/// Target of the not-found recovery action.
	pub fn not_found_path(&self) -> &str {
		&self.not_found_path
	}

	/// Formats a document title for a route title.
	pub fn document_title(&self, route_title: &str) -> String {
		format!("{} - {}", route_title, self.app_name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = NavigationSettings::default();
		assert_eq!(settings.app_name(), DEFAULT_APP_NAME);
		assert_eq!(settings.initial_path(), "/");
		assert_eq!(settings.navigating_delay(), Duration::from_millis(100));
		assert_eq!(settings.not_found_path(), "/");
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_partial_toml_keeps_defaults() {
		let settings = NavigationSettings::from_toml_str(
			r#"
			app_name = "Pairs"
			navigating_delay_ms = 250
			"#,
		)
		.unwrap();
		assert_eq!(settings.app_name(), "Pairs");
		assert_eq!(settings.navigating_delay(), Duration::from_millis(250));
		assert_eq!(settings.initial_path(), DEFAULT_INITIAL_PATH);
	}

	#[rstest]
	fn test_unknown_key_rejected() {
		let err = NavigationSettings::from_toml_str("theme = \"dark\"").unwrap_err();
		assert!(matches!(err, SettingsError::Parse(_)));
	}

	#[rstest]
	#[case("initial_path = \"match\"", "initial_path")]
	#[case("not_found_path = \"\"", "not_found_path")]
	#[case("app_name = \"  \"", "app_name")]
	fn test_invalid_values(#[case] source: &str, #[case] expected_key: &str) {
		let err = NavigationSettings::from_toml_str(source).unwrap_err();
		match err {
			SettingsError::Invalid { key, .. } => assert_eq!(key, expected_key),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[rstest]
	fn test_document_title() {
		let settings = NavigationSettings::default().with_app_name("Pairs");
		assert_eq!(settings.document_title("History"), "History - Pairs");
	}

	#[rstest]
	fn test_builder_setters() {
		let settings = NavigationSettings::default()
			.with_initial_path("/match")
			.with_not_found_path("/home")
			.with_navigating_delay(Duration::from_millis(5));
		assert_eq!(settings.initial_path(), "/match");
		assert_eq!(settings.not_found_path(), "/home");
		assert_eq!(settings.navigating_delay(), Duration::from_millis(5));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "initial_path = \"/history\"").unwrap();

		let settings = NavigationSettings::from_file(file.path()).unwrap();
		assert_eq!(settings.initial_path(), "/history");
	}

	#[rstest]
	fn test_from_missing_file() {
		let err = NavigationSettings::from_file("/nonexistent/pairlink.toml").unwrap_err();
		assert!(matches!(err, SettingsError::Io { .. }));
		assert!(err.to_string().contains("/nonexistent/pairlink.toml"));
	}
}
