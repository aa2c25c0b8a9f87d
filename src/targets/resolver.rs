//! Fuzzy target-name resolution
//!
//! A partial name resolves to one registered target: exact matches win
//! outright, then every candidate is scored (prefix 100, substring 95,
//! otherwise a normalized edit-similarity ratio) and the best score is
//! accepted when it clears the threshold. Ties break to the
//! lexicographically smallest candidate so resolution is deterministic.

use crate::error::VcliError;

/// Minimum score for a fuzzy match to be accepted.
pub const MIN_SCORE: u32 = 60;

/// Resolve `query` to one of `candidates`.
///
/// Pure over its inputs; on failure the error carries every candidate,
/// sorted, for the user-facing listing.
pub fn resolve(query: &str, candidates: &[String]) -> Result<String, VcliError> {
    if candidates.iter().any(|c| c == query) {
        return Ok(query.to_string());
    }

    let mut sorted: Vec<&String> = candidates.iter().collect();
    sorted.sort();

    let mut best: Option<(&str, u32)> = None;
    for candidate in sorted {
        let s = score(query, candidate);
        // Strict improvement only: first (smallest) name keeps a tied score.
        if best.map_or(true, |(_, bs)| s > bs) {
            best = Some((candidate, s));
        }
    }

    match best {
        Some((name, s)) if s >= MIN_SCORE => Ok(name.to_string()),
        _ => {
            let mut all = candidates.to_vec();
            all.sort();
            Err(VcliError::UnknownTarget {
                query: query.to_string(),
                candidates: all,
            })
        }
    }
}

/// Score one candidate against the query, in [0, 100].
pub fn score(query: &str, candidate: &str) -> u32 {
    if candidate.starts_with(query) {
        100
    } else if candidate.contains(query) {
        95
    } else {
        similarity(&query.to_lowercase(), &candidate.to_lowercase())
    }
}

/// Normalized edit similarity: `100 * (1 - lev / max_len)`.
fn similarity(a: &str, b: &str) -> u32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let dist = levenshtein(a, b);
    (100.0 * (1.0 - dist as f64 / max_len as f64)).round() as u32
}

/// Classic two-row Levenshtein over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
