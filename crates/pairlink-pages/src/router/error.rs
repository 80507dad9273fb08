//! Router configuration errors.
//!
//! Navigation itself never fails; only building a route table from a
//! manifest can.

/// Error type for route configuration.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
	/// A manifest entry names a view that is not registered.
	#[error("route `{path}` refers to unknown view `{view}`")]
	UnknownView {
		/// Path of the offending entry
		path: String,
		/// View name that failed to resolve
		view: String,
	},
	/// A manifest path is not absolute.
	#[error("invalid route path `{0}`: paths must start with `/`")]
	InvalidPath(String),
	/// The manifest is not valid TOML.
	#[error("failed to parse route manifest: {0}")]
	Manifest(#[from] toml::de::Error),
}
