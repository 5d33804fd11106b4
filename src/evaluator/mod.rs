pub mod ablation;
pub mod collision;
pub mod types;

pub use self::types::{AblationTerms, CollisionTerms, PotentialBreakdown};

use crate::environment::Environment;
use std::cmp::Ordering;

/// A scored candidate assignment.
///
/// Built for a single comparison and thrown away; it holds its own copy of the gene so the
/// caller is free to keep mutating the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub gene: Vec<i32>,
    /// Carried for the caller's bookkeeping. Scoring ignores it.
    pub unbalanced: bool,
    pub collide_potential: f64,
    pub ablation_potential: f64,
    pub fitness: f64,
}

impl Individual {
    pub fn new(gene: &[i32], env: &Environment, unbalanced: bool) -> Self {
        let collide_potential = collision::collision_terms(gene, env).total();
        let ablation_potential = ablation::ablation_terms(gene, env).total();
        Self {
            gene: gene.to_vec(),
            unbalanced,
            collide_potential,
            ablation_potential,
            fitness: fitness(collide_potential, ablation_potential),
        }
    }

    /// Orders by fitness; `Less` means `other` is strictly better.
    pub fn compare(&self, other: &Individual) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }

    pub fn is_improved_by(&self, other: &Individual) -> bool {
        self.compare(other) == Ordering::Less
    }
}

/// Bounded score in `(0, 1]`; a unit of collision outweighs a unit of distortion 128 to 1.
#[inline(always)]
pub fn fitness(collide_potential: f64, ablation_potential: f64) -> f64 {
    1.0 / (1.0 + f64::max(0.0, collide_potential * 8.0 + ablation_potential / 16.0))
}

/// Per-rule view of the same potentials [`Individual::new`] sums up.
pub fn breakdown(gene: &[i32], env: &Environment) -> PotentialBreakdown {
    let collision = collision::collision_terms(gene, env);
    let ablation = ablation::ablation_terms(gene, env);
    PotentialBreakdown {
        collision,
        ablation,
        fitness: fitness(collision.total(), ablation.total()),
    }
}
