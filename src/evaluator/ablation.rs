use super::types::AblationTerms;
use crate::environment::Environment;
use crate::model::Triplet;

/// Distortion of `gene` relative to the designed proportions.
///
/// Returns all-zero terms when the environment disables ablation scoring.
pub fn ablation_terms(gene: &[i32], env: &Environment) -> AblationTerms {
    let mut terms = AblationTerms::default();
    if env.no_ablation {
        return terms;
    }

    let uppx = env.uppx;
    let coeff = env.strategy.coeff_proportion_distortion;
    for (&y, av) in gene.iter().zip(&env.avails) {
        terms.center_deviation += av.ablation_coeff * uppx * (y as f64 - av.center).abs();
        if y > av.soft_high {
            terms.soft_bound += coeff * uppx * f64::min(1.0, (y - av.soft_high) as f64);
        }
        if y < av.soft_low {
            terms.soft_bound += coeff * uppx * f64::min(1.0, (av.soft_low - y) as f64);
        }
    }

    let limits = Limits::new(uppx);
    for t in &env.triplets {
        terms.triplet_distortion += triplet_distortion(gene, env, t, &limits);
    }
    terms
}

/// Device-scaled thresholds for comparing gap asymmetry against the design.
struct Limits {
    fine: f64,
    normal: f64,
    double: f64,
    compress: f64,
    uppx: f64,
}

impl Limits {
    fn new(uppx: f64) -> Self {
        Self {
            fine: uppx / 8.0,
            normal: uppx / 3.0,
            double: 2.0 * uppx / 3.0,
            compress: 3.0 * uppx / 4.0,
            uppx,
        }
    }
}

fn triplet_distortion(gene: &[i32], env: &Environment, t: &Triplet, lim: &Limits) -> f64 {
    let (j, k, m) = t.indices();
    if !(gene[j] > gene[k] && gene[k] > gene[m]) {
        return 0.0;
    }

    let space_jk = gene[j] - gene[k] - env.avails[j].proper_width;
    let space_km = gene[k] - gene[m] - env.avails[k].proper_width;
    let d = t.d1 - t.d2;

    let px_jk = space_jk as f64 * lim.uppx;
    let px_km = space_km as f64 * lim.uppx;
    let expanded = px_jk > t.d1 + lim.compress && px_km > t.d2 + lim.compress;
    let compressed = px_jk < t.d1 - lim.compress && px_km < t.d2 - lim.compress;
    let near_equal = d < lim.normal && d > -lim.normal;

    let penalty = (env.c[(j, k)] + env.c[(k, m)]) * env.strategy.coeff_distort;
    let mut p = 0.0;
    if (d >= lim.double && space_jk <= space_km)
        || (d >= lim.normal && space_jk < space_km)
        || (d <= -lim.double && space_jk >= space_km)
        || (d <= -lim.normal && space_jk > space_km)
        || (near_equal && (space_jk - space_km).abs() > 1)
        || (near_equal && (compressed || expanded))
    {
        p += penalty;
    }
    if d < lim.fine && d > -lim.fine && space_jk != space_km {
        p += penalty / 3.0;
    }
    p
}
