use crate::config::Strategy;
use crate::error::{invalid, GfResult};
use crate::evaluator::Individual;
use crate::model::{Avail, PairMatrix, Triplet};
use tracing::debug;
use typed_builder::TypedBuilder;

/// Raw per-glyph inputs, validated and frozen by [`EnvironmentParams::build_environment`].
#[derive(TypedBuilder)]
pub struct EnvironmentParams {
    pub avails: Vec<Avail>,
    /// `A`: alignment weights.
    pub alignment: Vec<Vec<f64>>,
    /// `C`: collision weights.
    pub collision: Vec<Vec<f64>>,
    /// `S`: swap, symmetry-break and diagonal-break weights.
    pub swap: Vec<Vec<f64>>,
    /// `P`: tie-break priority. All zero when absent.
    #[builder(default)]
    pub priority: Option<Vec<Vec<f64>>>,
    pub direct_overlaps: Vec<Vec<bool>>,
    #[builder(default)]
    pub symmetry: Option<Vec<Vec<bool>>>,
    #[builder(default)]
    pub triplets: Vec<Triplet>,
    /// Visiting order of the point-wise pass. Index order when absent.
    #[builder(default)]
    pub order: Option<Vec<usize>>,
    #[builder(default)]
    pub strategy: Strategy,
    pub upm: f64,
    pub ppem: f64,
    pub glyph_top_pixels: i32,
    pub glyph_bottom_pixels: i32,
    #[builder(default = false)]
    pub no_ablation: bool,
}

/// Everything the balancer and evaluator read. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Environment {
    pub avails: Vec<Avail>,
    pub a: PairMatrix<f64>,
    pub c: PairMatrix<f64>,
    pub s: PairMatrix<f64>,
    pub p: PairMatrix<f64>,
    pub direct_overlaps: PairMatrix<bool>,
    pub symmetry: PairMatrix<bool>,
    pub triplets: Vec<Triplet>,
    pub by_length: Vec<usize>,
    pub strategy: Strategy,
    /// Design units per device pixel.
    pub uppx: f64,
    pub glyph_top_pixels: i32,
    pub glyph_bottom_pixels: i32,
    pub no_ablation: bool,
}

impl EnvironmentParams {
    pub fn build_environment(self) -> GfResult<Environment> {
        self.strategy.validate()?;

        let n = self.avails.len();
        for (i, av) in self.avails.iter().enumerate() {
            if av.low > av.high {
                return Err(invalid!(
                    "point {} has low bound {} above high bound {}",
                    i,
                    av.low,
                    av.high
                ));
            }
            if av.proper_width < 0 {
                return Err(invalid!(
                    "point {} has negative proper width {}",
                    i,
                    av.proper_width
                ));
            }
            let reals = [av.center, av.ablation_coeff, av.y0, av.w0, av.y0_px];
            if reals.iter().any(|v| !v.is_finite()) {
                return Err(invalid!("point {} carries a non-finite coordinate", i));
            }
        }

        if !(self.upm.is_finite() && self.upm > 0.0) {
            return Err(invalid!("upm must be positive, got {}", self.upm));
        }
        if !(self.ppem.is_finite() && self.ppem > 0.0) {
            return Err(invalid!("ppem must be positive, got {}", self.ppem));
        }
        if self.glyph_bottom_pixels > self.glyph_top_pixels {
            return Err(invalid!(
                "glyph bottom {} lies above glyph top {}",
                self.glyph_bottom_pixels,
                self.glyph_top_pixels
            ));
        }

        let a = weights("A", self.alignment, n)?;
        let c = weights("C", self.collision, n)?;
        let s = weights("S", self.swap, n)?;
        let p = match self.priority {
            Some(rows) => weights("P", rows, n)?,
            None => PairMatrix::filled(n, 0.0),
        };
        let direct_overlaps = PairMatrix::from_rows("directOverlaps", self.direct_overlaps, n)?;
        let symmetry = match self.symmetry {
            Some(rows) => PairMatrix::from_rows("symmetry", rows, n)?,
            None => PairMatrix::filled(n, false),
        };
        // The final sweep copies row j onto k, so j's bounds must fit inside k's.
        for j in 0..n {
            for k in 0..j {
                let (aj, ak) = (&self.avails[j], &self.avails[k]);
                if symmetry[(j, k)] && (aj.low < ak.low || aj.high > ak.high) {
                    return Err(invalid!(
                        "symmetric points {} and {} have incompatible bounds [{}, {}] and [{}, {}]",
                        k,
                        j,
                        ak.low,
                        ak.high,
                        aj.low,
                        aj.high
                    ));
                }
            }
        }

        for (t, tri) in self.triplets.iter().enumerate() {
            let (j, k, m) = tri.indices();
            if j >= n || k >= n || m >= n {
                return Err(invalid!(
                    "triplet {} references ({}, {}, {}) but only {} points exist",
                    t,
                    j,
                    k,
                    m,
                    n
                ));
            }
            if j == k || k == m || j == m {
                return Err(invalid!("triplet {} repeats a point: ({}, {}, {})", t, j, k, m));
            }
            if !(tri.d1.is_finite() && tri.d2.is_finite() && tri.weight.is_finite()) {
                return Err(invalid!("triplet {} carries a non-finite distance", t));
            }
        }

        let by_length = match self.order {
            Some(order) => {
                check_permutation(&order, n)?;
                order
            }
            None => (0..n).collect(),
        };

        let env = Environment {
            avails: self.avails,
            a,
            c,
            s,
            p,
            direct_overlaps,
            symmetry,
            triplets: self.triplets,
            by_length,
            strategy: self.strategy,
            uppx: self.upm / self.ppem,
            glyph_top_pixels: self.glyph_top_pixels,
            glyph_bottom_pixels: self.glyph_bottom_pixels,
            no_ablation: self.no_ablation,
        };

        debug!(
            "Environment ready: {} points, {} triplets, uppx {:.2}",
            env.len(),
            env.triplets.len(),
            env.uppx
        );
        Ok(env)
    }
}

fn weights(name: &str, rows: Vec<Vec<f64>>, n: usize) -> GfResult<PairMatrix<f64>> {
    let m = PairMatrix::from_rows(name, rows, n)?;
    if m.cells().iter().any(|w| !w.is_finite()) {
        return Err(invalid!("matrix '{}' contains a non-finite weight", name));
    }
    Ok(m)
}

fn check_permutation(order: &[usize], n: usize) -> GfResult<()> {
    if order.len() != n {
        return Err(invalid!(
            "visiting order lists {} points, expected {}",
            order.len(),
            n
        ));
    }
    let mut seen = vec![false; n];
    for &i in order {
        if i >= n || seen[i] {
            return Err(invalid!("visiting order is not a permutation (bad index {})", i));
        }
        seen[i] = true;
    }
    Ok(())
}

impl Environment {
    pub fn len(&self) -> usize {
        self.avails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avails.is_empty()
    }

    /// The customary starting assignment: every point at its rounded center.
    pub fn initial_gene(&self) -> Vec<i32> {
        self.avails.iter().map(Avail::rounded_center).collect()
    }

    /// Rejects a gene that does not line up with the descriptors or leaves its bounds.
    pub fn check_gene(&self, gene: &[i32]) -> GfResult<()> {
        if gene.len() != self.len() {
            return Err(invalid!(
                "gene has {} rows but the glyph has {} points",
                gene.len(),
                self.len()
            ));
        }
        for (i, (&row, av)) in gene.iter().zip(&self.avails).enumerate() {
            if row < av.low || row > av.high {
                return Err(invalid!(
                    "row {} of point {} lies outside [{}, {}]",
                    row,
                    i,
                    av.low,
                    av.high
                ));
            }
        }
        Ok(())
    }

    pub fn individual(&self, gene: &[i32], unbalanced: bool) -> Individual {
        Individual::new(gene, self, unbalanced)
    }
}
