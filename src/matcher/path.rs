use crate::matcher::segment::segment_matches;
use crate::matcher::tokenizer::Tokenized;
use crate::matcher::window::find_window;

/// The multi-segment wildcard token.
pub const DOUBLE_WILDCARD: &str = "**";

/// How much of the path a pattern has to account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
	/// The whole path must be consumed by the pattern.
	Full,

	/// The path only has to be compatible with the pattern's leading
	/// segments; anything from the first `**` onwards is assumed to apply.
	Prefix,
}

/// Match a tokenized pattern against a tokenized path.
///
/// Segments are matched greedily from the front up to the first `**`,
/// then from the back down to the last `**`. Whatever is left between
/// the two is searched window by window, one `**`-delimited group at a
/// time, taking the leftmost hit.
pub fn sequence_matches(pattern: &Tokenized<'_>, path: &Tokenized<'_>, mode: MatchMode) -> bool {
	let patt = &pattern.tokens;
	let dirs = &path.tokens;

	// Ranges are half-open: patt[p_start..p_end], dirs[s_start..s_end].
	let (mut p_start, mut p_end) = (0, patt.len());
	let (mut s_start, mut s_end) = (0, dirs.len());

	// Everything up to the first "**".
	while p_start < p_end && s_start < s_end {
		let token = patt[p_start];
		if token == DOUBLE_WILDCARD {
			break;
		}
		if !segment_matches(token, dirs[s_start]) {
			return false;
		}
		p_start += 1;
		s_start += 1;
	}

	if s_start == s_end {
		// Path exhausted.
		if p_start == p_end {
			return pattern.trailing_separator == path.trailing_separator;
		}
		if mode == MatchMode::Prefix {
			return true;
		}
		if p_start + 1 == p_end && patt[p_start] == "*" && path.trailing_separator {
			return true;
		}
		return only_double_wildcards(&patt[p_start..p_end]);
	}

	if p_start == p_end {
		// Pattern exhausted with path segments left over.
		return false;
	}

	if mode == MatchMode::Prefix && patt[p_start] == DOUBLE_WILDCARD {
		return true;
	}

	// Everything after the last "**".
	while p_start < p_end && s_start < s_end {
		let token = patt[p_end - 1];
		if token == DOUBLE_WILDCARD {
			break;
		}
		if !segment_matches(token, dirs[s_end - 1]) {
			return false;
		}
		p_end -= 1;
		s_end -= 1;
	}

	if s_start == s_end {
		return only_double_wildcards(&patt[p_start..p_end]);
	}

	// patt[p_start] is now the first "**" and patt[p_end - 1] the last.
	while p_start != p_end - 1 && s_start < s_end {
		let Some(offset) = patt[p_start + 1..p_end]
			.iter()
			.position(|&token| token == DOUBLE_WILDCARD)
		else {
			break;
		};
		let next_double = p_start + 1 + offset;

		// "**/**" is the same as "**".
		if next_double == p_start + 1 {
			p_start += 1;
			continue;
		}

		let group = &patt[p_start + 1..next_double];
		let Some(found) = find_window(group, &dirs[s_start..s_end], |p, s| segment_matches(p, s))
		else {
			return false;
		};

		p_start = next_double;
		s_start += found + group.len();
	}

	only_double_wildcards(&patt[p_start..p_end])
}

fn only_double_wildcards(tokens: &[&str]) -> bool {
	tokens.iter().all(|&token| token == DOUBLE_WILDCARD)
}
