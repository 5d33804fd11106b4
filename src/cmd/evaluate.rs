use crate::reports;
use clap::Args;
use gridfit::config::Strategy;
use gridfit::error::GfResult;
use gridfit::evaluator::breakdown;
use gridfit::problem::ProblemSet;
use std::path::PathBuf;
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Problem set to score (JSON)
    pub input: PathBuf,

    /// Only score glyphs whose name contains this text
    #[arg(short, long)]
    pub glyph: Option<String>,

    #[command(flatten)]
    pub strategy: Strategy,
}

/// Scores each glyph's starting gene without optimizing it.
pub fn run(args: &EvaluateArgs, set: &ProblemSet, strategy: &Strategy) -> GfResult<usize> {
    let mut rows = Vec::new();
    let mut rejected = 0;
    for glyph in super::select(set, &args.glyph) {
        let scored = glyph
            .environment(strategy)
            .and_then(|env| glyph.starting_gene(&env).map(|gene| breakdown(&gene, &env)));
        match scored {
            Ok(b) => rows.push((glyph.name.clone(), b)),
            Err(e) => {
                error!("❌ {}: {}", glyph.name, e);
                rejected += 1;
            }
        }
    }
    reports::print_breakdowns(&rows);
    Ok(rejected)
}
