use serde::{Deserialize, Serialize};

/// Collision potential split by the rule that produced each contribution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionTerms {
    pub alignment: f64,
    pub collide: f64,
    pub diagonal_break: f64,
    pub symmetry_break: f64,
    pub swap: f64,
}

impl CollisionTerms {
    pub fn total(&self) -> f64 {
        self.alignment + self.collide + self.diagonal_break + self.symmetry_break + self.swap
    }
}

/// Ablation (distortion) potential split by source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AblationTerms {
    pub center_deviation: f64,
    pub soft_bound: f64,
    pub triplet_distortion: f64,
}

impl AblationTerms {
    pub fn total(&self) -> f64 {
        self.center_deviation + self.soft_bound + self.triplet_distortion
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialBreakdown {
    pub collision: CollisionTerms,
    pub ablation: AblationTerms,
    pub fitness: f64,
}
