//! Greedy one-to-one matcher.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::metric::{LcsSimilarity, SimilarityMetric};
use crate::types::{MatchedPair, Matching, PairKind};

/// Default placeholder for labels without a counterpart.
pub const DEFAULT_PLACEHOLDER: &str = "?";

/// Candidate count at which enumeration switches to the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// How the greedy pass decides that a label has already been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consumption {
    /// Each position is tracked separately. Duplicate labels are independent
    /// candidates.
    #[default]
    ByIndex,
    /// Labels are tracked by text. Once a text is committed, every other
    /// position carrying the same text on that side is treated as used and
    /// is neither matched nor reported as a leftover.
    ByValue,
}

/// Matcher configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherOptions {
    /// Value paired with labels that found no counterpart.
    pub placeholder: String,
    /// Used-label tracking during the greedy pass.
    pub consumption: Consumption,
    /// Candidates scoring below this are never committed (default: 0).
    pub min_similarity: usize,
    /// Number of candidate pairs at which scoring runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            consumption: Consumption::default(),
            min_similarity: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl MatcherOptions {
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_consumption(mut self, consumption: Consumption) -> Self {
        self.consumption = consumption;
        self
    }

    #[must_use]
    pub fn with_min_similarity(mut self, min_similarity: usize) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Set the parallel threshold. `usize::MAX` keeps scoring sequential.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    source_index: usize,
    target_index: usize,
    similarity: usize,
}

/// A pair positioned for output ordering.
struct Placed {
    primary: usize,
    /// `None` for leftovers, which sort ahead of committed pairs on the same
    /// primary index.
    secondary: Option<usize>,
    pair: MatchedPair,
}

/// Pairs two label lists by descending similarity.
///
/// Every source/target combination is scored, candidates are sorted by
/// score (highest first, ties in enumeration order) and committed greedily
/// whenever neither side is used yet. Whatever remains on either side is
/// paired with the placeholder.
///
/// # Example
///
/// ```
/// use catmatch_map::{GreedyMatcher, MatcherOptions};
///
/// let matcher = GreedyMatcher::new(MatcherOptions::default());
/// let matching = matcher.match_labels(&["apple", "banana", "cherry"], &["apple", "cherry"]);
///
/// assert_eq!(matching.get("banana"), Some("?"));
/// assert_eq!(matching.get("cherry"), Some("cherry"));
/// ```
#[derive(Debug, Clone)]
pub struct GreedyMatcher<M = LcsSimilarity> {
    metric: M,
    options: MatcherOptions,
}

impl GreedyMatcher<LcsSimilarity> {
    /// Creates a matcher using case-insensitive LCS similarity.
    pub fn new(options: MatcherOptions) -> Self {
        Self::with_metric(LcsSimilarity, options)
    }
}

impl Default for GreedyMatcher<LcsSimilarity> {
    fn default() -> Self {
        Self::new(MatcherOptions::default())
    }
}

impl<M: SimilarityMetric> GreedyMatcher<M> {
    /// Creates a matcher with a custom similarity metric.
    pub fn with_metric(metric: M, options: MatcherOptions) -> Self {
        Self { metric, options }
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Matches `source` labels against `target` labels.
    ///
    /// Never fails: empty inputs give an empty or placeholder-only result.
    pub fn match_labels<S, T>(&self, source: &[S], target: &[T]) -> Matching
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        let mut candidates = self.enumerate(source, target);
        debug!(
            source = source.len(),
            target = target.len(),
            candidates = candidates.len(),
            "scored candidate pairs"
        );

        // Stable: equal scores keep (source, target) enumeration order.
        candidates.sort_by(|a, b| b.similarity.cmp(&a.similarity));

        let mut used = Used::new(self.options.consumption, source.len(), target.len());
        let mut placed = Vec::with_capacity(source.len().max(target.len()));

        for candidate in candidates {
            if candidate.similarity < self.options.min_similarity {
                break;
            }
            let source_text = source[candidate.source_index].as_ref();
            let target_text = target[candidate.target_index].as_ref();
            if used.source(candidate.source_index, source_text)
                || used.target(candidate.target_index, target_text)
            {
                continue;
            }
            used.consume(
                candidate.source_index,
                source_text,
                candidate.target_index,
                target_text,
            );
            trace!(
                source_index = candidate.source_index,
                target_index = candidate.target_index,
                similarity = candidate.similarity,
                "committed pair"
            );
            placed.push(Placed {
                primary: candidate.source_index,
                secondary: Some(candidate.target_index),
                pair: MatchedPair {
                    key: source_text.to_string(),
                    value: target_text.to_string(),
                    kind: PairKind::Matched {
                        similarity: candidate.similarity,
                    },
                    source_index: Some(candidate.source_index),
                    target_index: Some(candidate.target_index),
                },
            });
        }

        for (index, label) in source.iter().enumerate() {
            let label = label.as_ref();
            if used.source(index, label) {
                continue;
            }
            placed.push(self.leftover(index, label, PairKind::UnmatchedSource));
        }
        for (index, label) in target.iter().enumerate() {
            let label = label.as_ref();
            if used.target(index, label) {
                continue;
            }
            placed.push(self.leftover(index, label, PairKind::UnmatchedTarget));
        }

        placed.sort_by_key(|p| (p.primary, p.secondary));
        let matching = Matching::from_pairs(
            self.options.placeholder.clone(),
            placed.into_iter().map(|p| p.pair).collect(),
        );

        let stats = matching.stats();
        debug!(
            matched = stats.matched,
            unmatched_source = stats.unmatched_source,
            unmatched_target = stats.unmatched_target,
            collapsed = stats.collapsed,
            "matching complete"
        );
        matching
    }

    fn enumerate<S, T>(&self, source: &[S], target: &[T]) -> Vec<Candidate>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        let total = source.len().saturating_mul(target.len());
        if total >= self.options.parallel_threshold && source.len() > 1 {
            trace!(total, "scoring candidates in parallel");
            source
                .par_iter()
                .enumerate()
                .flat_map_iter(|(i, label)| self.score_row(i, label.as_ref(), target))
                .collect()
        } else {
            let mut candidates = Vec::with_capacity(total);
            for (i, label) in source.iter().enumerate() {
                candidates.extend(self.score_row(i, label.as_ref(), target));
            }
            candidates
        }
    }

    fn score_row<'a, T>(
        &'a self,
        source_index: usize,
        source_label: &'a str,
        target: &'a [T],
    ) -> impl Iterator<Item = Candidate> + 'a
    where
        T: AsRef<str>,
    {
        target
            .iter()
            .enumerate()
            .map(move |(target_index, label)| Candidate {
                source_index,
                target_index,
                similarity: self.metric.similarity(source_label, label.as_ref()),
            })
    }

    fn leftover(&self, index: usize, label: &str, kind: PairKind) -> Placed {
        let (source_index, target_index) = match kind {
            PairKind::UnmatchedTarget => (None, Some(index)),
            _ => (Some(index), None),
        };
        Placed {
            primary: index,
            secondary: None,
            pair: MatchedPair {
                key: label.to_string(),
                value: self.options.placeholder.clone(),
                kind,
                source_index,
                target_index,
            },
        }
    }
}

/// Tracks which labels the greedy pass has consumed.
struct Used<'a> {
    mode: Consumption,
    source_positions: Vec<bool>,
    target_positions: Vec<bool>,
    source_values: BTreeSet<&'a str>,
    target_values: BTreeSet<&'a str>,
}

impl<'a> Used<'a> {
    fn new(mode: Consumption, source_len: usize, target_len: usize) -> Self {
        let (source_len, target_len) = match mode {
            Consumption::ByIndex => (source_len, target_len),
            Consumption::ByValue => (0, 0),
        };
        Self {
            mode,
            source_positions: vec![false; source_len],
            target_positions: vec![false; target_len],
            source_values: BTreeSet::new(),
            target_values: BTreeSet::new(),
        }
    }

    fn source(&self, index: usize, text: &str) -> bool {
        match self.mode {
            Consumption::ByIndex => self.source_positions[index],
            Consumption::ByValue => self.source_values.contains(text),
        }
    }

    fn target(&self, index: usize, text: &str) -> bool {
        match self.mode {
            Consumption::ByIndex => self.target_positions[index],
            Consumption::ByValue => self.target_values.contains(text),
        }
    }

    fn consume(
        &mut self,
        source_index: usize,
        source: &'a str,
        target_index: usize,
        target: &'a str,
    ) {
        match self.mode {
            Consumption::ByIndex => {
                self.source_positions[source_index] = true;
                self.target_positions[target_index] = true;
            }
            Consumption::ByValue => {
                self.source_values.insert(source);
                self.target_values.insert(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> GreedyMatcher {
        GreedyMatcher::default()
    }

    fn entries(matching: &Matching) -> Vec<(&str, &str)> {
        matching.iter().collect()
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        let matching = matcher().match_labels(&empty, &empty);
        assert!(matching.is_empty());
    }

    #[test]
    fn test_empty_target_maps_everything_to_placeholder() {
        let empty: [&str; 0] = [];
        let matching = matcher().match_labels(&["a", "b"], &empty);
        assert_eq!(entries(&matching), vec![("a", "?"), ("b", "?")]);
    }

    #[test]
    fn test_empty_source_turns_targets_into_keys() {
        let empty: [&str; 0] = [];
        let matching = matcher().match_labels(&empty, &["x", "y"]);
        assert_eq!(entries(&matching), vec![("x", "?"), ("y", "?")]);
        assert_eq!(matching.stats().unmatched_target, 2);
    }

    #[test]
    fn test_zero_similarity_pairs_are_committed() {
        let matching = matcher().match_labels(&["Бетон с присадкой"], &["Цемент"]);
        assert_eq!(entries(&matching), vec![("Бетон с присадкой", "Цемент")]);
    }

    #[test]
    fn test_ties_follow_enumeration_order() {
        // Every pair scores 0, so the first source takes the first target.
        let matching = matcher().match_labels(&["a", "b"], &["x", "y"]);
        assert_eq!(entries(&matching), vec![("a", "x"), ("b", "y")]);
    }

    #[test]
    fn test_target_leftover_sorts_before_pair_at_same_index() {
        let matching =
            matcher().match_labels(&["apple", "cherry"], &["apple", "banana", "cherry"]);
        assert_eq!(
            entries(&matching),
            vec![("apple", "apple"), ("banana", "?"), ("cherry", "cherry")]
        );
    }

    #[test]
    fn test_min_similarity_leaves_weak_pairs_unmatched() {
        let options = MatcherOptions::default().with_min_similarity(3);
        let matching =
            GreedyMatcher::new(options).match_labels(&["abcd", "zz"], &["abce", "qq"]);
        assert_eq!(matching.get("abcd"), Some("abce"));
        assert_eq!(matching.get("zz"), Some("?"));
        assert_eq!(matching.get("qq"), Some("?"));
    }

    #[test]
    fn test_custom_placeholder() {
        let options = MatcherOptions::default().with_placeholder("<none>");
        let matching = GreedyMatcher::new(options).match_labels(&["a", "b"], &["a"]);
        assert_eq!(matching.get("b"), Some("<none>"));
        assert_eq!(matching.placeholder(), "<none>");
    }

    #[test]
    fn test_duplicate_source_by_index_keeps_every_position() {
        let matching = matcher().match_labels(&["nail", "nail"], &["nail", "nails"]);
        // Both positions are paired; the map view keeps the first.
        assert_eq!(matching.pairs().len(), 2);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching.get("nail"), Some("nail"));
        assert_eq!(matching.stats().matched, 2);
        assert_eq!(matching.stats().collapsed, 1);
    }

    #[test]
    fn test_duplicate_source_by_value_blocks_repeats() {
        let options = MatcherOptions::default().with_consumption(Consumption::ByValue);
        let matching =
            GreedyMatcher::new(options).match_labels(&["nail", "nail"], &["nail", "nails"]);
        // The second "nail" is considered used once the first is committed,
        // so "nails" has no partner.
        assert_eq!(entries(&matching), vec![("nail", "nail"), ("nails", "?")]);
        assert_eq!(matching.stats().matched, 1);
    }

    #[test]
    fn test_custom_metric() {
        let by_length = |a: &str, b: &str| 100 - a.len().abs_diff(b.len()).min(100);
        let matcher = GreedyMatcher::with_metric(by_length, MatcherOptions::default());
        let matching = matcher.match_labels(&["aa", "bbbb"], &["cccc", "dd"]);
        assert_eq!(entries(&matching), vec![("aa", "dd"), ("bbbb", "cccc")]);
    }

    #[test]
    fn test_parallel_enumeration_matches_sequential() {
        let source: Vec<String> = (0..40).map(|i| format!("item {i} red")).collect();
        let target: Vec<String> = (0..35).map(|i| format!("red item {}", 39 - i)).collect();

        let sequential =
            GreedyMatcher::new(MatcherOptions::default().with_parallel_threshold(usize::MAX))
                .match_labels(&source, &target);
        let parallel = GreedyMatcher::new(MatcherOptions::default().with_parallel_threshold(1))
            .match_labels(&source, &target);

        assert_eq!(sequential, parallel);
    }
}
