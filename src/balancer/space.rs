//! Clearance queries against the `directOverlaps` neighbourhood of a point.

use crate::environment::Environment;

/// True when no overlapping point below `k` sits within `distance` rows of it.
pub fn can_be_adjusted_down(gene: &[i32], k: usize, env: &Environment, distance: f64) -> bool {
    (0..k).all(|j| !(env.direct_overlaps[(k, j)] && f64::from(gene[k] - gene[j] - 1) <= distance))
}

/// True when no overlapping point above `k` sits within `distance` rows of it.
pub fn can_be_adjusted_up(gene: &[i32], k: usize, env: &Environment, distance: f64) -> bool {
    (k + 1..gene.len())
        .all(|j| !(env.direct_overlaps[(j, k)] && f64::from(gene[j] - gene[k] - 1) <= distance))
}

/// Free rows under `k`'s stroke, limited by `bottom` and by every overlapping point below.
pub fn space_below(env: &Environment, gene: &[i32], k: usize, bottom: i32) -> i32 {
    let pw = env.avails[k].proper_width;
    let mut space = gene[k] - pw - bottom;
    for j in (0..k).rev() {
        if env.direct_overlaps[(k, j)] {
            space = space.min(gene[k] - gene[j] - pw);
        }
    }
    space
}

/// Free rows above `k`, limited by `top` and by the stroke of every overlapping point above.
pub fn space_above(env: &Environment, gene: &[i32], k: usize, top: i32) -> i32 {
    let mut space = top - gene[k];
    for j in k + 1..gene.len() {
        if env.direct_overlaps[(j, k)] {
            space = space.min(gene[j] - gene[k] - env.avails[j].proper_width);
        }
    }
    space
}
