//! Match pipeline: ingest, match, write.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use catmatch_ingest::read_file;
use catmatch_map::{GreedyMatcher, Matching};
use catmatch_output::{write_file, write_json_file};
use tracing::{info, info_span, trace};

use crate::config::AppConfig;
use crate::logging::redact_value;

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct MatchRun {
    pub input: PathBuf,
    /// Where the lines were written; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
    pub source_count: usize,
    pub target_count: usize,
    pub matching: Matching,
    pub elapsed: Duration,
}

/// Reads the configured input, matches it and writes the results.
///
/// With `dry_run` nothing is written.
pub fn run_match(config: &AppConfig, dry_run: bool) -> Result<MatchRun> {
    let started = Instant::now();
    let files = &config.files;

    let ingest_span = info_span!("ingest", input = %files.input.display());
    let blocks = ingest_span
        .in_scope(|| read_file(&files.input))
        .with_context(|| format!("read input {}", files.input.display()))?;
    info!(
        source = blocks.source.len(),
        target = blocks.target.len(),
        "loaded label lists"
    );

    let candidates = blocks.source.len().saturating_mul(blocks.target.len());
    let match_span = info_span!("match", candidates);
    let matching = match_span.in_scope(|| {
        let matcher = GreedyMatcher::new(config.matching.clone());
        matcher.match_labels(&blocks.source, &blocks.target)
    });
    for pair in matching.pairs() {
        trace!(
            key = redact_value(&pair.key),
            value = redact_value(&pair.value),
            similarity = pair.kind.similarity(),
            "output pair"
        );
    }
    let stats = matching.stats();
    info!(
        matched = stats.matched,
        unmatched_source = stats.unmatched_source,
        unmatched_target = stats.unmatched_target,
        "matched labels"
    );

    let mut output = None;
    let mut json_report = None;
    if dry_run {
        info!("dry run, skipping output");
    } else {
        let output_span = info_span!("output", output = %files.output.display());
        let _guard = output_span.enter();
        write_file(&files.output, &matching)
            .with_context(|| format!("write output {}", files.output.display()))?;
        output = Some(files.output.clone());
        if let Some(path) = &files.json_report {
            write_json_file(path, &matching)
                .with_context(|| format!("write JSON report {}", path.display()))?;
            json_report = Some(path.clone());
        }
        info!(lines = matching.len(), "wrote results");
    }

    Ok(MatchRun {
        input: files.input.clone(),
        output,
        json_report,
        source_count: blocks.source.len(),
        target_count: blocks.target.len(),
        matching,
        elapsed: started.elapsed(),
    })
}
