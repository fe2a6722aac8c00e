//! Similarity metrics for label matching.
//!
//! A metric scores how alike two labels are as a non-negative integer; higher
//! means more similar. The matcher only relies on the ordering of scores, so
//! any metric satisfying [`SimilarityMetric`] can be substituted.

/// Computes a similarity score between two labels.
///
/// Implementations must be pure and deterministic. Symmetry is not required.
/// The `Sync` bound lets the matcher score candidate rows in parallel.
pub trait SimilarityMetric: Sync {
    /// Returns the similarity of `source` to `target`.
    fn similarity(&self, source: &str, target: &str) -> usize;
}

impl<F> SimilarityMetric for F
where
    F: Fn(&str, &str) -> usize + Sync,
{
    fn similarity(&self, source: &str, target: &str) -> usize {
        self(source, target)
    }
}

/// Case-insensitive longest common subsequence length.
///
/// Both labels are lowercased before comparison. Identical labels score
/// their own length in characters, which is the maximum any pair involving
/// them can reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LcsSimilarity;

impl LcsSimilarity {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityMetric for LcsSimilarity {
    fn similarity(&self, source: &str, target: &str) -> usize {
        lcs_length(source, target)
    }
}

/// Length of the longest common subsequence of two labels, ignoring case.
///
/// Uses two rolling rows of length `target.chars().count() + 1`, so memory is
/// linear in the target length.
pub fn lcs_length(source: &str, target: &str) -> usize {
    let source = source.to_lowercase();
    let target: Vec<char> = target.to_lowercase().chars().collect();
    if source.is_empty() || target.is_empty() {
        return 0;
    }

    let width = target.len();
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for source_ch in source.chars() {
        for (j, &target_ch) in target.iter().enumerate() {
            curr[j + 1] = if source_ch == target_ch {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[width]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings() {
        assert_eq!(lcs_length("", ""), 0);
        assert_eq!(lcs_length("abc", ""), 0);
        assert_eq!(lcs_length("", "abc"), 0);
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(lcs_length("abcdefg", "abcdefg"), 7);
    }

    #[test]
    fn test_no_common_subsequence() {
        assert_eq!(lcs_length("abc", "def"), 0);
    }

    #[test]
    fn test_different_strings() {
        // "acde"
        assert_eq!(lcs_length("abcdef", "azcde"), 4);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(lcs_length("AbCdEf", "aBcDeF"), 6);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(lcs_length("шуруп", "ШУРУП"), 5);
        assert_eq!(lcs_length("краска синяя", "краска"), 6);
    }

    #[test]
    fn test_closure_metric() {
        let exact = |a: &str, b: &str| usize::from(a == b);
        assert_eq!(exact.similarity("x", "x"), 1);
        assert_eq!(exact.similarity("x", "y"), 0);
    }

    #[test]
    fn test_lcs_metric_is_symmetric_on_sample() {
        let metric = LcsSimilarity::new();
        assert_eq!(
            metric.similarity("ведро для воды", "корыто для воды"),
            metric.similarity("корыто для воды", "ведро для воды")
        );
    }
}
