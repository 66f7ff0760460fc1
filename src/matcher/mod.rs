//! Ant-style path pattern matching.
//!
//! Patterns are split on a separator into tokens. Within a token, `?`
//! matches one character and `*` matches any run of characters. A token
//! that is exactly `**` matches zero or more whole segments.
//!
//! Matching is pure and allocation is call-scoped, so a [`PathMatcher`]
//! can be shared freely between threads. Patterns with many wildcards
//! can cost quadratic time per `**`-delimited group; cap pattern size
//! before matching untrusted input (see `max-pattern-segments` in the
//! configuration).

pub mod extract;
pub mod path;
pub mod segment;
pub mod tokenizer;
mod window;

pub use extract::extract_wildcard_path;
pub use path::{DOUBLE_WILDCARD, MatchMode, sequence_matches};
pub use segment::segment_matches;
pub use tokenizer::{Tokenized, tokenize};

/// The separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '/';

/// Matches paths against Ant-style patterns such as `/static/**/*.css`.
///
/// # Example
///
/// ```
/// use antpath_cli::matcher::PathMatcher;
///
/// let matcher = PathMatcher::new();
/// assert!(matcher.matches("/docs/**/*.html", "/docs/guide/index.html"));
/// assert!(!matcher.matches("/docs/*.html", "/docs/guide/index.html"));
/// assert_eq!(
/// 	matcher.extract_path_within_pattern("/docs/**", "/docs/guide/intro"),
/// 	"guide/intro"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMatcher {
	separator: char,
}

impl Default for PathMatcher {
	fn default() -> Self {
		Self::new()
	}
}

impl PathMatcher {
	/// Create a matcher using `/` as the separator.
	pub const fn new() -> Self {
		Self::with_separator(DEFAULT_SEPARATOR)
	}

	/// Create a matcher using a custom separator, e.g. `.` for package names.
	pub const fn with_separator(separator: char) -> Self {
		PathMatcher { separator }
	}

	pub const fn separator(&self) -> char {
		self.separator
	}

	/// Check whether `path` is entirely matched by `pattern`.
	pub fn matches(&self, pattern: &str, path: &str) -> bool {
		self.do_match(pattern, path, MatchMode::Full)
	}

	/// Check whether `path` could be the start of something `pattern` matches.
	///
	/// Returns true once the pattern reaches a `**` with every earlier
	/// segment matched, or when the path runs out first.
	pub fn matches_start(&self, pattern: &str, path: &str) -> bool {
		self.do_match(pattern, path, MatchMode::Prefix)
	}

	/// Whether `candidate` contains any wildcard character.
	///
	/// Strings without wildcards can be compared for equality instead of
	/// being matched.
	pub fn is_pattern(&self, candidate: &str) -> bool {
		extract::has_wildcard(candidate)
	}

	/// The part of `path` that falls under the wildcard part of `pattern`.
	///
	/// `pattern` is assumed to match `path`; check with [`Self::matches`] first.
	pub fn extract_path_within_pattern(&self, pattern: &str, path: &str) -> String {
		extract_wildcard_path(pattern, path, self.separator)
	}

	fn do_match(&self, pattern: &str, path: &str, mode: MatchMode) -> bool {
		let pattern = Tokenized::new(pattern, self.separator);
		let path = Tokenized::new(path, self.separator);
		sequence_matches(&pattern, &path, mode)
	}
}
