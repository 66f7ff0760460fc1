use crate::matcher::tokenizer::tokenize;

/// Return the part of `path` that lies under the wildcard part of `pattern`.
///
/// Extraction starts at the first pattern token holding `*` or `?` and runs
/// to the end. Each position that has a path segment contributes it, and a
/// separator follows every position except the last one. The last pattern
/// position takes all remaining path segments, so a trailing `**` yields
/// the whole tail.
///
/// The result is positional: callers must check that the pattern matches
/// the path first, otherwise the output is meaningless.
pub fn extract_wildcard_path(pattern: &str, path: &str, separator: char) -> String {
	let pattern_parts = tokenize(pattern, separator);
	let path_parts = tokenize(path, separator);

	let mut buffer = String::new();
	let mut started = false;

	for (i, part) in pattern_parts.iter().enumerate() {
		started |= has_wildcard(part);
		if !started {
			continue;
		}

		let last = i + 1 == pattern_parts.len();
		if last {
			if let Some(rest) = path_parts.get(i..) {
				let mut rest = rest.iter();
				if let Some(first) = rest.next() {
					buffer.push_str(first);
				}
				for segment in rest {
					buffer.push(separator);
					buffer.push_str(segment);
				}
			}
		} else {
			if let Some(segment) = path_parts.get(i) {
				buffer.push_str(segment);
			}
			buffer.push(separator);
		}
	}

	buffer
}

pub(crate) fn has_wildcard(s: &str) -> bool {
	s.contains(['*', '?'])
}
