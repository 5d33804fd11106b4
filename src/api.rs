use crate::balancer::{balance, BalanceReport};
use crate::config::Strategy;
use crate::error::GfResult;
use crate::evaluator::{breakdown, PotentialBreakdown};
use crate::problem::GlyphProblem;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    pub glyph: String,
    pub initial: Vec<i32>,
    pub gene: Vec<i32>,
    pub before: PotentialBreakdown,
    pub after: PotentialBreakdown,
    pub report: BalanceReport,
}

impl FitResult {
    pub fn changed_points(&self) -> usize {
        self.initial
            .iter()
            .zip(&self.gene)
            .filter(|(a, b)| a != b)
            .count()
    }
}

/// Validates one glyph, balances its starting gene and scores both ends.
pub fn fit_glyph(problem: &GlyphProblem, strategy: &Strategy) -> GfResult<FitResult> {
    let env = problem.environment(strategy)?;
    let initial = problem.starting_gene(&env)?;

    let mut gene = initial.clone();
    let report = balance(&mut gene, &env);
    let before = breakdown(&initial, &env);
    let after = breakdown(&gene, &env);

    debug!(
        "{}: fitness {:.6} -> {:.6} after {} moves",
        problem.name,
        before.fitness,
        after.fitness,
        report.total_moves()
    );

    Ok(FitResult {
        glyph: problem.name.clone(),
        initial,
        gene,
        before,
        after,
        report,
    })
}

/// Fits every glyph in parallel. Results keep the input order.
pub fn fit_all(problems: &[GlyphProblem], strategy: &Strategy) -> Vec<GfResult<FitResult>> {
    problems
        .par_iter()
        .map(|p| {
            let res = fit_glyph(p, strategy);
            if let Err(e) = &res {
                warn!("Glyph '{}' rejected: {}", p.name, e);
            }
            res
        })
        .collect()
}
