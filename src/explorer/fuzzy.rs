//! Subsequence matching for node-name autocomplete.

/// Case-insensitive subsequence match: every character of `query` appears in
/// `candidate` in the same order, not necessarily adjacent.
pub fn matches(candidate: &str, query: &str) -> bool {
	let mut wanted = query.chars().flat_map(char::to_lowercase).peekable();
	for c in candidate.chars().flat_map(char::to_lowercase) {
		match wanted.peek() {
			Some(&q) if q == c => {
				wanted.next();
			}
			Some(_) => {}
			None => return true,
		}
	}
	wanted.peek().is_none()
}

/// Autocomplete candidates for `query`, in candidate order.
///
/// Queries shorter than `min_len` characters yield nothing. A `limit` of 0
/// keeps every match.
pub fn suggest<'a>(
	candidates: impl IntoIterator<Item = &'a str>,
	query: &str,
	min_len: usize,
	limit: usize,
) -> Vec<&'a str> {
	if query.chars().count() < min_len {
		return Vec::new();
	}
	let limit = if limit == 0 { usize::MAX } else { limit };
	candidates
		.into_iter()
		.filter(|c| matches(c, query))
		.take(limit)
		.collect()
}
