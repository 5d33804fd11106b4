use super::space::{can_be_adjusted_down, can_be_adjusted_up};
use crate::environment::Environment;
use tracing::trace;

/// Minimum free rows a neighbour must keep for a point to step towards it.
pub const MOVE_CLEARANCE: f64 = 1.8;
/// A point only moves when it sits further than this from its center.
pub const CENTER_SLACK: f64 = 0.75;

/// Point-wise pass: nudges each point one row back towards its center when the
/// neighbourhood leaves room. Returns the number of moves made.
pub fn balance_move(gene: &mut [i32], env: &Environment) -> usize {
    let mut moved = 0;
    for &j in &env.by_length {
        let av = &env.avails[j];
        if av.is_boundary() {
            continue;
        }
        let y = gene[j];
        if y > av.low
            && f64::from(y) - av.center > CENTER_SLACK
            && can_be_adjusted_down(gene, j, env, MOVE_CLEARANCE)
        {
            gene[j] -= 1;
            moved += 1;
            trace!("point {} moved down to {}", j, gene[j]);
        } else if y < av.high
            && av.center - f64::from(y) > CENTER_SLACK
            && can_be_adjusted_up(gene, j, env, MOVE_CLEARANCE)
        {
            gene[j] += 1;
            moved += 1;
            trace!("point {} moved up to {}", j, gene[j]);
        }
    }
    moved
}
