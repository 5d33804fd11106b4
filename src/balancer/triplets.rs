use super::space::{space_above, space_below};
use crate::environment::Environment;
use crate::model::Triplet;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::trace;

/// Priority at or above which a spare-side move is trusted without a fitness check.
const TRUSTED_PRIORITY: f64 = 4.0;
/// Rows beyond the glyph's top/bottom that the slack pass may still count as free.
const GLYPH_SLACK_ROWS: i32 = 3;

/// Grid relationship between two points, from the upper row minus the lower row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum GapState {
    /// The upper point sits below the lower one.
    Inverted,
    /// Same row.
    Annexed,
    /// One row apart.
    Colliding,
    /// Exactly two rows apart.
    Spaced,
    /// More than two rows apart.
    Spare,
}

impl GapState {
    pub fn classify(gap: i32) -> Self {
        match gap {
            i32::MIN..=-1 => GapState::Inverted,
            0 => GapState::Annexed,
            1 => GapState::Colliding,
            2 => GapState::Spaced,
            _ => GapState::Spare,
        }
    }
}

/// Rows the middle point may still travel before hitting its hard bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headroom {
    pub down: i32,
    pub up: i32,
}

/// Proposed move of a triplet's middle point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mark: i32,
    /// Commit only if fitness strictly improves.
    pub verify: bool,
}

impl Decision {
    const NONE: Decision = Decision {
        mark: 0,
        verify: false,
    };

    fn verified(mark: i32) -> Self {
        Self { mark, verify: true }
    }

    fn unverified(mark: i32) -> Self {
        Self {
            mark,
            verify: false,
        }
    }
}

/// Weights of the upper `(j, k)` and lower `(k, m)` pair of a triplet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidePair {
    pub upper: f64,
    pub lower: f64,
}

/// Decision table of the collision-driven pass. First matching row wins.
pub fn decide(
    upper: GapState,
    lower: GapState,
    room: Headroom,
    alignment: SidePair,
    priority: SidePair,
) -> Decision {
    use GapState::*;

    match (upper, lower) {
        (Colliding, Spaced) if room.down > 0 => Decision::verified(-1),
        (Spaced, Colliding) if room.up > 0 => Decision::verified(1),
        (Annexed, Spaced) if room.down > 1 => Decision::verified(-2),
        (Spaced, Annexed) if room.up > 1 => Decision::verified(2),
        (Colliding | Annexed, Spare) if room.down > 0 => Decision {
            mark: -1,
            verify: priority.lower < TRUSTED_PRIORITY,
        },
        (Spare, Colliding | Annexed) if room.up > 0 => Decision {
            mark: 1,
            verify: priority.upper < TRUSTED_PRIORITY,
        },
        (Colliding, Colliding) => {
            if alignment.upper <= alignment.lower && room.up > 0 {
                Decision::unverified(1)
            } else if alignment.upper >= alignment.lower && room.down > 0 {
                Decision::unverified(-1)
            } else if room.up > 0 {
                Decision::unverified(1)
            } else if room.down > 0 {
                Decision::unverified(-1)
            } else {
                Decision::NONE
            }
        }
        _ => Decision::NONE,
    }
}

/// Reads the current gaps and headroom of `t` and looks up its move.
pub fn decide_for(gene: &[i32], env: &Environment, t: &Triplet) -> Decision {
    let (j, k, m) = t.indices();
    let av = &env.avails[k];
    decide(
        GapState::classify(gene[j] - gene[k]),
        GapState::classify(gene[k] - gene[m]),
        Headroom {
            down: gene[k] - av.low,
            up: av.high - gene[k],
        },
        SidePair {
            upper: env.a[(j, k)],
            lower: env.a[(k, m)],
        },
        SidePair {
            upper: env.p[(j, k)],
            lower: env.p[(k, m)],
        },
    )
}

/// Collision-driven pass: relieves the tighter side of each triplet by moving its middle
/// point. Returns the number of committed moves; rejected verified moves do not count.
pub fn balance_triplets_collision(gene: &mut [i32], env: &Environment) -> usize {
    let mut moved = 0;
    for t in &env.triplets {
        let k = t.middle;
        let decision = decide_for(gene, env, t);
        if decision.mark == 0 {
            continue;
        }

        if decision.verify {
            if commit_if_improved(gene, env, k, decision.mark) {
                moved += 1;
            }
        } else {
            gene[k] += decision.mark;
            moved += 1;
            trace!("triplet middle {} moved by {}", k, decision.mark);
        }
    }
    moved
}

/// Moves point `k` by `mark` and keeps the move only if fitness strictly improves.
/// Returns whether the move was kept; otherwise `gene` is left as it was.
pub fn commit_if_improved(gene: &mut [i32], env: &Environment, k: usize, mark: i32) -> bool {
    let before = env.individual(gene, true);
    gene[k] += mark;
    let after = env.individual(gene, true);
    if before.is_improved_by(&after) {
        trace!(
            "triplet middle {} moved by {} (fitness {:.6} -> {:.6})",
            k,
            mark,
            before.fitness,
            after.fitness
        );
        true
    } else {
        gene[k] -= mark;
        false
    }
}

/// Slack pass: shifts each middle point one row towards the side with more free room when
/// the design proportions and priorities agree. Returns the number of moves made.
pub fn balance_triplets_slack(gene: &mut [i32], env: &Environment) -> usize {
    let mut moved = 0;
    for t in &env.triplets {
        let (j, k, m) = t.indices();
        let (aj, ak, am) = (&env.avails[j], &env.avails[k], &env.avails[m]);

        let su = space_above(env, gene, k, env.glyph_top_pixels + GLYPH_SLACK_ROWS);
        let sb = space_below(env, gene, k, env.glyph_bottom_pixels - GLYPH_SLACK_ROWS);
        let d1 = gene[j] - aj.proper_width - gene[k];
        let d2 = gene[k] - ak.proper_width - gene[m];
        let o1 = aj.y0 - aj.w0 - ak.y0;
        let o2 = ak.y0 - ak.w0 - am.y0;
        let (p_upper, p_lower) = (env.p[(j, k)], env.p[(k, m)]);

        if gene[k] < ak.high
            && o1 / o2 < 2.0
            && p_upper <= p_lower
            && su > 1
            && (sb < 1 || d1 >= d2 * 2)
        {
            gene[k] += 1;
            moved += 1;
            trace!("slack: middle {} up to {}", k, gene[k]);
        } else if gene[k] > ak.low
            && o2 / o1 < 2.0
            && p_upper >= p_lower
            && sb > 1
            && (su < 1 || d2 >= d1 * 2)
        {
            gene[k] -= 1;
            moved += 1;
            trace!("slack: middle {} down to {}", k, gene[k]);
        }
    }
    moved
}
