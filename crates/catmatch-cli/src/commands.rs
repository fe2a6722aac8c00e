use std::env;

use anyhow::{Context, Result};
use catmatch_cli::config::{AppConfig, ConfigOverrides};
use catmatch_cli::pipeline::{MatchRun, run_match};
use catmatch_map::{LcsSimilarity, SimilarityMetric};
use tracing::info_span;

use crate::cli::{MatchArgs, ScoreArgs};

pub fn run_match_command(args: &MatchArgs) -> Result<MatchRun> {
    let cwd = env::current_dir().context("resolve working directory")?;
    let mut config = AppConfig::discover(args.config.as_deref(), &cwd).context("load config")?;
    config.apply(&overrides_from_args(args));

    let span = info_span!("run", input = %config.files.input.display());
    let _guard = span.enter();
    run_match(&config, args.dry_run)
}

pub fn run_score(args: &ScoreArgs) -> usize {
    LcsSimilarity::new().similarity(&args.source, &args.target)
}

fn overrides_from_args(args: &MatchArgs) -> ConfigOverrides {
    ConfigOverrides {
        input: args.input.clone(),
        output: args.output.clone(),
        json_report: args.json_report.clone(),
        placeholder: args.placeholder.clone(),
        consumption: args.consume.map(Into::into),
        min_similarity: args.min_similarity,
    }
}
