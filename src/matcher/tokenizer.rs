/// A tokenized path or pattern.
///
/// Tokenization drops empty segments, so whether the original string ended
/// with a separator has to be remembered separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized<'a> {
	/// Non-empty segments in order.
	pub tokens: Vec<&'a str>,

	/// Whether the original string ended with the separator.
	pub trailing_separator: bool,
}

impl<'a> Tokenized<'a> {
	pub fn new(s: &'a str, separator: char) -> Self {
		Tokenized {
			tokens: tokenize(s, separator),
			trailing_separator: s.ends_with(separator),
		}
	}
}

/// Split `s` on every `separator`, dropping empty segments.
///
/// Leading, trailing and repeated separators therefore vanish:
/// `"/a//b/"` and `"a/b"` produce the same tokens.
pub fn tokenize(s: &str, separator: char) -> Vec<&str> {
	s.split(separator).filter(|token| !token.is_empty()).collect()
}
