use crate::matcher::window::find_window;

const STAR: char = '*';
const ANY: char = '?';

/// Match a single pattern token against a single path segment.
///
/// `*` matches any run of characters within the segment and `?` matches
/// exactly one character. Comparison is case-sensitive and works on
/// Unicode scalar values. The token must not be the `**` sentinel; that
/// one is handled a level up.
pub fn segment_matches(pattern: &str, text: &str) -> bool {
	let pattern: Vec<char> = pattern.chars().collect();
	let text: Vec<char> = text.chars().collect();

	if !pattern.contains(&STAR) {
		return pattern.len() == text.len() && fixed_matches(&pattern, &text);
	}

	if pattern.len() == 1 {
		return true;
	}

	// Ranges are half-open: pattern[p_start..p_end], text[t_start..t_end].
	let (mut p_start, mut p_end) = (0, pattern.len());
	let (mut t_start, mut t_end) = (0, text.len());

	// Characters before the first star.
	while pattern[p_start] != STAR && t_start < t_end {
		if !char_matches(pattern[p_start], text[t_start]) {
			return false;
		}
		p_start += 1;
		t_start += 1;
	}
	if t_start == t_end {
		return only_stars(&pattern[p_start..p_end]);
	}

	// Characters after the last star.
	while pattern[p_end - 1] != STAR && t_start < t_end {
		if !char_matches(pattern[p_end - 1], text[t_end - 1]) {
			return false;
		}
		p_end -= 1;
		t_end -= 1;
	}
	if t_start == t_end {
		return only_stars(&pattern[p_start..p_end]);
	}

	// pattern[p_start] is now the first star and pattern[p_end - 1] the last.
	while p_start != p_end - 1 && t_start < t_end {
		let Some(offset) = pattern[p_start + 1..p_end]
			.iter()
			.position(|&ch| ch == STAR)
		else {
			break;
		};
		let next_star = p_start + 1 + offset;

		// "**" inside a segment is the same as "*".
		if next_star == p_start + 1 {
			p_start += 1;
			continue;
		}

		let needle = &pattern[p_start + 1..next_star];
		let Some(found) = find_window(needle, &text[t_start..t_end], |&p, &t| char_matches(p, t))
		else {
			return false;
		};

		p_start = next_star;
		t_start += found + needle.len();
	}

	only_stars(&pattern[p_start..p_end])
}

fn char_matches(pattern: char, text: char) -> bool {
	pattern == ANY || pattern == text
}

/// Position-by-position comparison of a star-free pattern.
fn fixed_matches(pattern: &[char], text: &[char]) -> bool {
	pattern
		.iter()
		.zip(text)
		.all(|(&p, &t)| char_matches(p, t))
}

fn only_stars(pattern: &[char]) -> bool {
	pattern.iter().all(|&ch| ch == STAR)
}
