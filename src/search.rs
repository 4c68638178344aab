//! Fuzzy query router.
//!
//! Maps free-text queries to approximate matches over a fixed collection.
//! Score semantics are pinned here rather than inherited from a library:
//!
//! - keys and queries are lowercased before comparison
//! - each key contributes the full string plus its whitespace tokens as
//!   match targets; the query contributes itself plus its tokens of at
//!   least the minimum length
//! - `score = lev(needle, target) / max(|needle|, |target|)`, so 0.0 is
//!   an exact match and 1.0 matches anything
//! - a record matches when the best score over all needle/target pairs
//!   is at or below the configured threshold
//! - results are ordered by ascending score; ties keep the insertion
//!   order of the collection

use std::cmp::Ordering;

/// A single hit: index into the source collection plus its score.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub index: usize,
    pub score: f64,
}

/// Fuzzy-search index over a fixed collection of string keys.
///
/// Built once when the backing collection is ready and never mutated
/// afterwards; rebuild from scratch if the collection ever changes.
pub struct FuzzyIndex {
    /// Lowercased match targets per record, in insertion order.
    entries: Vec<Vec<String>>,
    threshold: f64,
    min_query_len: usize,
}

impl FuzzyIndex {
    pub fn new(threshold: f64, min_query_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            threshold,
            min_query_len,
        }
    }

    /// Add a record with a single key.
    pub fn insert(&mut self, key: &str) {
        self.insert_keys(&[key]);
    }

    /// Add a record matchable by any of the given keys.
    pub fn insert_keys(&mut self, keys: &[&str]) {
        let mut targets: Vec<String> = Vec::new();
        for key in keys {
            let lower = key.trim().to_lowercase();
            if lower.is_empty() {
                continue;
            }
            for token in lower.split_whitespace() {
                if !targets.iter().any(|t| t == token) {
                    targets.push(token.to_string());
                }
            }
            if !targets.iter().any(|t| *t == lower) {
                targets.push(lower);
            }
        }
        self.entries.push(targets);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank all records against a query.
    ///
    /// Queries shorter than the minimum length yield no matches, as does
    /// an empty collection.
    pub fn search(&self, query: &str) -> Vec<FuzzyMatch> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < self.min_query_len {
            return Vec::new();
        }

        // The full query plus its tokens long enough to carry signal.
        let mut needles: Vec<&str> = query
            .split_whitespace()
            .filter(|t| t.chars().count() >= self.min_query_len)
            .collect();
        if !needles.iter().any(|n| *n == query) {
            needles.push(&query);
        }

        let mut matches = Vec::new();
        for (index, targets) in self.entries.iter().enumerate() {
            let mut best = f64::INFINITY;
            for needle in &needles {
                let needle_len = needle.chars().count();
                for target in targets {
                    let target_len = target.chars().count();
                    let max_len = needle_len.max(target_len);
                    if max_len == 0 {
                        continue;
                    }
                    // Edit distance is at least the length difference, so
                    // targets past the threshold on length alone are skipped.
                    if needle_len.abs_diff(target_len) as f64 / max_len as f64 > self.threshold {
                        continue;
                    }
                    let score = edit_distance(needle, target) as f64 / max_len as f64;
                    if score < best {
                        best = score;
                    }
                }
            }
            if best <= self.threshold {
                matches.push(FuzzyMatch { index, score: best });
            }
        }

        // Stable sort preserves insertion order for equal scores.
        matches.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        matches
    }
}

/// Compute Levenshtein edit distance between two strings.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drug_index() -> FuzzyIndex {
        let mut index = FuzzyIndex::new(0.4, 2);
        for name in ["Amoxicillin", "Paracetamol", "Ibuprofen", "Amlodipine"] {
            index.insert(name);
        }
        index
    }

    #[test]
    fn edit_distance_basic() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("amoxicilin", "amoxicillin"), 1);
    }

    #[test]
    fn verbatim_name_is_score_zero_top_hit() {
        let index = drug_index();
        let hits = index.search("amoxicillin");
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let index = drug_index();
        let hits = index.search("PARACETAMOL");
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn short_queries_yield_nothing() {
        let index = drug_index();
        assert!(index.search("").is_empty());
        assert!(index.search("a").is_empty());
        assert!(index.search("  a  ").is_empty());
    }

    #[test]
    fn empty_index_yields_nothing() {
        let index = FuzzyIndex::new(0.4, 2);
        assert!(index.search("amoxicillin").is_empty());
    }

    #[test]
    fn misspelling_still_matches() {
        let index = drug_index();
        let hits = index.search("amoxicilin");
        assert_eq!(hits[0].index, 0);
        assert!(hits[0].score > 0.0);
    }

    #[test]
    fn unrelated_query_stays_below_threshold() {
        let index = drug_index();
        assert!(index.search("zzzzzzzzzz").is_empty());
    }

    #[test]
    fn token_of_multiword_key_matches() {
        let mut index = FuzzyIndex::new(0.4, 2);
        index.insert("Amoxicillin Trihydrate");
        let hits = index.search("trihydrate");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut index = FuzzyIndex::new(0.4, 2);
        index.insert("aspirin");
        index.insert("aspirin");
        let hits = index.search("aspirin");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].index, 1);
    }

    #[test]
    fn secondary_key_matches_record() {
        let mut index = FuzzyIndex::new(0.4, 2);
        index.insert_keys(&["What should I do if I miss a dose?", "የመድሃኒት ጊዜ ካለፈ?"]);
        let hits = index.search("miss a dose");
        assert_eq!(hits.len(), 1);
    }
}
