use crate::reports;
use clap::Args;
use gridfit::api::fit_all;
use gridfit::config::Strategy;
use gridfit::error::GfResult;
use gridfit::problem::{write_assignments_csv, write_results_json, ProblemSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct BalanceArgs {
    /// Problem set to fit (JSON)
    pub input: PathBuf,

    /// Write full fit results as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write final rows as `glyph,point,row` CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Only fit glyphs whose name contains this text
    #[arg(short, long)]
    pub glyph: Option<String>,

    #[command(flatten)]
    pub strategy: Strategy,
}

/// Fits the selected glyphs. Returns the number of glyphs that were rejected.
pub fn run(args: &BalanceArgs, set: &ProblemSet, strategy: &Strategy) -> GfResult<usize> {
    let glyphs: Vec<_> = super::select(set, &args.glyph)
        .into_iter()
        .cloned()
        .collect();
    info!(
        "Balancing {} glyphs ({} passes max per stage)",
        glyphs.len(),
        strategy.rebalance_passes
    );

    let start = Instant::now();
    let mut results = Vec::with_capacity(glyphs.len());
    let mut rejected = 0;
    for (glyph, res) in glyphs.iter().zip(fit_all(&glyphs, strategy)) {
        match res {
            Ok(r) => results.push(r),
            Err(e) => {
                error!("❌ {}: {}", glyph.name, e);
                rejected += 1;
            }
        }
    }
    info!("Done in {:.2?}", start.elapsed());

    reports::print_fit_summary(&results);

    if let Some(path) = &args.output {
        write_results_json(&results, BufWriter::new(File::create(path)?))?;
        info!("📝 Results written to {}", path.display());
    }
    if let Some(path) = &args.csv {
        write_assignments_csv(&results, File::create(path)?)?;
        info!("📝 Assignments written to {}", path.display());
    }
    Ok(rejected)
}
