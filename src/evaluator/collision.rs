use super::types::CollisionTerms;
use crate::environment::Environment;

// Asymmetric tolerance for diagonal strokes: low resolutions tend to round these upward.
const DIAG_BIAS_PIXELS: f64 = 1.0 / 6.0;
const DIAG_BIAS_PIXELS_NEG: f64 = 1.0 / 3.0;

/// Accumulates the collision potential of `gene` over every pair `k < j`.
pub fn collision_terms(gene: &[i32], env: &Environment) -> CollisionTerms {
    let avails = &env.avails;
    let mut terms = CollisionTerms::default();

    for j in 0..gene.len() {
        let aj = &avails[j];
        for k in 0..j {
            let ak = &avails[k];
            let (yj, yk) = (gene[j], gene[k]);

            if yj == yk {
                terms.alignment += env.a[(j, k)];
            } else if yj <= yk + aj.proper_width {
                terms.collide += env.c[(j, k)];
            }

            let same_region = aj.shares_region(ak);
            if same_region && breaks_diagonal(yj - yk, aj.y0_px - ak.y0_px) {
                terms.diagonal_break += env.s[(j, k)];
            }

            if env.symmetry[(j, k)] {
                if yj != yk {
                    terms.symmetry_break += env.s[(j, k)];
                }
            } else if yj < yk {
                terms.swap += env.s[(j, k)];
            } else if aj.y0 - aj.w0 < ak.y0 && !same_region && too_high(yj, yk, aj.proper_width)
            {
                // The upper stroke overlapped the lower one in the outline but now
                // clears it completely:
                // ------.
                //       |   ,-------
                // ------'   |
                //           `-------
                terms.swap += env.s[(j, k)];
            }
        }
    }
    terms
}

#[inline(always)]
fn breaks_diagonal(gap: i32, original: f64) -> bool {
    let gap = gap as f64;
    gap > (original + DIAG_BIAS_PIXELS).ceil() || gap < (original - DIAG_BIAS_PIXELS_NEG).ceil()
}

#[inline(always)]
fn too_high(yj: i32, yk: i32, proper_width: i32) -> bool {
    if proper_width > 1 {
        yj - proper_width >= yk
    } else {
        yj - proper_width > yk
    }
}
