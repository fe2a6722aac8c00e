//! Label matching engine.
//!
//! Pairs two unordered lists of free-text labels one-to-one by textual
//! similarity. Labels left without a counterpart on either side are paired
//! with a placeholder.
//!
//! - [`metric`]: the [`SimilarityMetric`] trait and the default
//!   case-insensitive longest common subsequence metric.
//! - [`matcher`]: the [`GreedyMatcher`], which scores every cross pair,
//!   commits the best non-conflicting pairs first and reconciles leftovers.
//! - [`types`]: the [`Matching`] result and its summary counts.
//!
//! The greedy pass is an approximation: a pair committed early is never
//! revisited, so the total similarity is not guaranteed to be maximal.

#![deny(unsafe_code)]

pub mod matcher;
pub mod metric;
pub mod types;

pub use matcher::{
    Consumption, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_PLACEHOLDER, GreedyMatcher, MatcherOptions,
};
pub use metric::{LcsSimilarity, SimilarityMetric, lcs_length};
pub use types::{MatchStats, MatchedPair, Matching, PairKind};
