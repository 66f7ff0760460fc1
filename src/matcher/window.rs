/// Find the first offset in `haystack` where every element of `needle`
/// matches the element at the same position, according to `matches`.
///
/// Scans left to right and stops at the first hit. A needle longer than
/// the haystack never matches.
pub(crate) fn find_window<P, T>(
	needle: &[P],
	haystack: &[T],
	mut matches: impl FnMut(&P, &T) -> bool,
) -> Option<usize> {
	let last = haystack.len().checked_sub(needle.len())?;
	(0..=last).find(|&offset| {
		needle
			.iter()
			.zip(&haystack[offset..])
			.all(|(p, t)| matches(p, t))
	})
}
