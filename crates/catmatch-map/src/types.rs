//! Matching result types.

use std::collections::HashMap;

use serde::Serialize;

/// How an output pair came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairKind {
    /// A source label committed to a target label.
    Matched { similarity: usize },
    /// A source label left over after the greedy pass.
    UnmatchedSource,
    /// A target label left over after the greedy pass. Its text is the key.
    UnmatchedTarget,
}

impl PairKind {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn similarity(&self) -> Option<usize> {
        match self {
            Self::Matched { similarity } => Some(*similarity),
            _ => None,
        }
    }
}

/// A single output record, before duplicate keys are collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    /// Output key: the source label, or the target label for a leftover target.
    pub key: String,
    /// Output value: the committed target label or the placeholder.
    pub value: String,
    #[serde(flatten)]
    pub kind: PairKind,
    /// Position of the source label, when the pair involves one.
    pub source_index: Option<usize>,
    /// Position of the target label, when the pair involves one.
    pub target_index: Option<usize>,
}

/// Summary counts for a matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Committed source-target pairs.
    pub matched: usize,
    /// Source labels paired with the placeholder.
    pub unmatched_source: usize,
    /// Target labels paired with the placeholder.
    pub unmatched_target: usize,
    /// Pairs dropped from the map view because their key was already present.
    pub collapsed: usize,
    /// Sum of similarity over committed pairs.
    pub total_similarity: usize,
}

/// Ordered label mapping produced by the matcher.
///
/// Holds every output pair in output order. The map view ([`Matching::iter`],
/// [`Matching::get`], [`Matching::len`]) keeps only the first pair for each
/// key; later pairs with the same key are still available via
/// [`Matching::pairs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    placeholder: String,
    pairs: Vec<MatchedPair>,
    /// Indices into `pairs` of the first occurrence of each key, in order.
    entries: Vec<usize>,
    index: HashMap<String, usize>,
}

impl Matching {
    /// Builds a matching from pairs already in output order.
    pub fn from_pairs(placeholder: impl Into<String>, pairs: Vec<MatchedPair>) -> Self {
        let mut entries = Vec::with_capacity(pairs.len());
        let mut index = HashMap::with_capacity(pairs.len());
        for (position, pair) in pairs.iter().enumerate() {
            if index.contains_key(&pair.key) {
                continue;
            }
            index.insert(pair.key.clone(), position);
            entries.push(position);
        }
        Self {
            placeholder: placeholder.into(),
            pairs,
            entries,
            index,
        }
    }

    /// The placeholder used for unmatched labels.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value mapped to `key`, first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.pairs[position].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates `(key, value)` in output order with duplicate keys collapsed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|&position| {
            let pair = &self.pairs[position];
            (pair.key.as_str(), pair.value.as_str())
        })
    }

    /// All output pairs in order, including those hidden by key collapse.
    pub fn pairs(&self) -> &[MatchedPair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<MatchedPair> {
        self.pairs
    }

    pub fn stats(&self) -> MatchStats {
        let mut stats = MatchStats {
            collapsed: self.pairs.len() - self.entries.len(),
            ..MatchStats::default()
        };
        for pair in &self.pairs {
            match pair.kind {
                PairKind::Matched { similarity } => {
                    stats.matched += 1;
                    stats.total_similarity += similarity;
                }
                PairKind::UnmatchedSource => stats.unmatched_source += 1,
                PairKind::UnmatchedTarget => stats.unmatched_target += 1,
            }
        }
        stats
    }
}

impl<'a> IntoIterator for &'a Matching {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str, kind: PairKind) -> MatchedPair {
        MatchedPair {
            key: key.to_string(),
            value: value.to_string(),
            kind,
            source_index: None,
            target_index: None,
        }
    }

    #[test]
    fn first_key_wins_in_map_view() {
        let matching = Matching::from_pairs(
            "?",
            vec![
                pair("a", "x", PairKind::Matched { similarity: 1 }),
                pair("a", "?", PairKind::UnmatchedSource),
                pair("b", "?", PairKind::UnmatchedTarget),
            ],
        );

        assert_eq!(matching.len(), 2);
        assert_eq!(matching.get("a"), Some("x"));
        assert_eq!(matching.pairs().len(), 3);
        let collected: Vec<_> = matching.iter().collect();
        assert_eq!(collected, vec![("a", "x"), ("b", "?")]);
    }

    #[test]
    fn stats_count_every_pair() {
        let matching = Matching::from_pairs(
            "?",
            vec![
                pair("a", "x", PairKind::Matched { similarity: 3 }),
                pair("b", "y", PairKind::Matched { similarity: 2 }),
                pair("a", "?", PairKind::UnmatchedSource),
                pair("z", "?", PairKind::UnmatchedTarget),
            ],
        );

        let stats = matching.stats();
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.total_similarity, 5);
        assert_eq!(stats.unmatched_source, 1);
        assert_eq!(stats.unmatched_target, 1);
        assert_eq!(stats.collapsed, 1);
    }

    #[test]
    fn empty_matching() {
        let matching = Matching::from_pairs("?", Vec::new());
        assert!(matching.is_empty());
        assert_eq!(matching.iter().count(), 0);
        assert_eq!(matching.stats(), MatchStats::default());
    }
}
