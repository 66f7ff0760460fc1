use std::path::PathBuf;

/// Library-level structured errors for antpath.
///
/// Pattern matching itself never fails; every variant here comes from
/// loading or validating configuration. The CLI binary wraps these with
/// `anyhow` for context chains.
#[derive(Debug, thiserror::Error)]
pub enum AntpathError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Path separator must be exactly one character, got {value:?}")]
	InvalidSeparator { value: String },

	#[error("Route path must not be empty")]
	EmptyRoutePath,

	#[error("Route defined more than once: {path}")]
	DuplicateRoute { path: String },

	#[error("Redirect target must not be empty in route: {route}")]
	EmptyRedirectTarget { route: String },

	#[error("Pattern has {segments} segments, limit is {limit}: {pattern}")]
	PatternTooComplex {
		pattern: String,
		segments: usize,
		limit: usize,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using AntpathError.
pub type Result<T> = std::result::Result<T, AntpathError>;
