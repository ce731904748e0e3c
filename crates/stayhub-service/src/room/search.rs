//! Fuzzy city matching for room search.
//!
//! A free-text city query is resolved against the distinct set of known
//! city values. A known city matches when either string contains the other
//! (case-insensitively) or their Levenshtein distance is at most
//! [`MAX_EDIT_DISTANCE`]. Matching is pure and deterministic.

/// Maximum edit distance at which two city names are still considered the
/// same place (tolerates up to three typos).
pub const MAX_EDIT_DISTANCE: usize = 3;

/// Levenshtein distance over Unicode code points, with unit cost for
/// insertion, deletion, and substitution.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic programming over the edit matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let insertion = curr[j] + 1;
            let deletion = prev[j + 1] + 1;
            curr[j + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Resolve a city query against the known city list.
///
/// Returns every known city that is a close match, preserving the input
/// order. An empty result means the caller should fall back to a plain
/// substring filter on the raw query.
pub fn match_cities(query: &str, known_cities: &[String]) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    known_cities
        .iter()
        .filter(|city| {
            let city = city.to_lowercase();
            city.contains(&query)
                || query.contains(&city)
                || levenshtein(&query, &city) <= MAX_EDIT_DISTANCE
        })
        .cloned()
        .collect()
}
