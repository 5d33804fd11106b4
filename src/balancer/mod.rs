pub mod moves;
pub mod space;
pub mod triplets;

pub use self::triplets::GapState;

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    PointMove,
    TripletCollision,
    TripletSlack,
    Symmetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    pub pass: Pass,
    pub sweeps: usize,
    pub moves: usize,
    /// The last sweep changed nothing.
    pub converged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub passes: Vec<PassOutcome>,
}

impl BalanceReport {
    pub fn outcome(&self, pass: Pass) -> Option<&PassOutcome> {
        self.passes.iter().find(|o| o.pass == pass)
    }

    pub fn total_moves(&self) -> usize {
        self.passes.iter().map(|o| o.moves).sum()
    }

    /// True when every pass was a no-op on its first sweep.
    pub fn is_settled(&self) -> bool {
        self.passes
            .iter()
            .all(|o| o.converged && o.moves == 0 && o.sweeps <= 1)
    }
}

/// Runs the three balancing passes and the final symmetry sweep over `gene` in place.
///
/// Never fails: every move is range-checked before it is applied, and running out of
/// sweeps simply leaves the last state in place.
///
/// # Panics
///
/// Panics if `gene` does not have one row per point. Run [`Environment::check_gene`] on
/// genes that did not come from [`Environment::initial_gene`].
pub fn balance(gene: &mut [i32], env: &Environment) -> BalanceReport {
    debug_assert_eq!(gene.len(), env.len());

    let passes = vec![
        iterate(Pass::PointMove, gene, env, moves::balance_move),
        iterate(
            Pass::TripletCollision,
            gene,
            env,
            triplets::balance_triplets_collision,
        ),
        iterate(Pass::TripletSlack, gene, env, triplets::balance_triplets_slack),
        symmetry_pass(gene, env),
    ];
    BalanceReport { passes }
}

fn iterate<F>(pass: Pass, gene: &mut [i32], env: &Environment, sweep: F) -> PassOutcome
where
    F: Fn(&mut [i32], &Environment) -> usize,
{
    let mut outcome = PassOutcome {
        pass,
        sweeps: 0,
        moves: 0,
        converged: false,
    };
    for _ in 0..env.strategy.rebalance_passes {
        let moved = sweep(gene, env);
        outcome.sweeps += 1;
        outcome.moves += moved;
        if moved == 0 {
            outcome.converged = true;
            break;
        }
    }
    debug!(
        "{}: {} sweeps, {} moves, converged: {}",
        pass, outcome.sweeps, outcome.moves, outcome.converged
    );
    outcome
}

fn symmetry_pass(gene: &mut [i32], env: &Environment) -> PassOutcome {
    let fixes = enforce_symmetry(gene, env);
    debug!("{}: {} rows copied", Pass::Symmetry, fixes);
    PassOutcome {
        pass: Pass::Symmetry,
        sweeps: 1,
        moves: fixes,
        converged: true,
    }
}

/// Copies the higher-index row onto the lower-index point of every mismatched symmetry pair.
///
/// Walks from the top index down, so a chain of pairs settles on the row of its
/// highest-index member in one sweep.
pub fn enforce_symmetry(gene: &mut [i32], env: &Environment) -> usize {
    let mut fixes = 0;
    for j in (0..gene.len()).rev() {
        for k in 0..j {
            if env.symmetry[(j, k)] && gene[j] != gene[k] {
                gene[k] = gene[j];
                fixes += 1;
            }
        }
    }
    fixes
}
