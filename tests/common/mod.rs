#![allow(dead_code)]

use gridfit::config::Strategy;
use gridfit::environment::{Environment, EnvironmentParams};
use gridfit::model::{Avail, Triplet};
use gridfit::problem::GlyphProblem;

/// Builder for Avail to keep fixtures short
pub struct AvailBuilder {
    avail: Avail,
}

impl AvailBuilder {
    /// A point centered on `center` with wide hard and soft bounds.
    pub fn new(center: f64) -> Self {
        Self {
            avail: Avail {
                proper_width: 0,
                low: 0,
                high: 20,
                soft_low: 0,
                soft_high: 20,
                center,
                ablation_coeff: 0.0,
                region_id: None,
                y0: 0.0,
                w0: 0.0,
                y0_px: 0.0,
                at_glyph_bottom: false,
                at_glyph_top: false,
            },
        }
    }

    pub fn bounds(mut self, low: i32, high: i32) -> Self {
        self.avail.low = low;
        self.avail.high = high;
        self
    }

    pub fn soft(mut self, soft_low: i32, soft_high: i32) -> Self {
        self.avail.soft_low = soft_low;
        self.avail.soft_high = soft_high;
        self
    }

    pub fn width(mut self, proper_width: i32) -> Self {
        self.avail.proper_width = proper_width;
        self
    }

    pub fn ablation(mut self, coeff: f64) -> Self {
        self.avail.ablation_coeff = coeff;
        self
    }

    pub fn region(mut self, id: u32) -> Self {
        self.avail.region_id = Some(id);
        self
    }

    pub fn outline(mut self, y0: f64, w0: f64, y0_px: f64) -> Self {
        self.avail.y0 = y0;
        self.avail.w0 = w0;
        self.avail.y0_px = y0_px;
        self
    }

    pub fn top(mut self) -> Self {
        self.avail.at_glyph_top = true;
        self
    }

    pub fn bottom(mut self) -> Self {
        self.avail.at_glyph_bottom = true;
        self
    }

    pub fn build(self) -> Avail {
        self.avail
    }
}

/// Dense pair tables for a glyph fixture. Everything starts at zero / false.
pub struct Tables {
    pub a: Vec<Vec<f64>>,
    pub c: Vec<Vec<f64>>,
    pub s: Vec<Vec<f64>>,
    pub p: Vec<Vec<f64>>,
    pub overlaps: Vec<Vec<bool>>,
    pub symmetry: Vec<Vec<bool>>,
}

impl Tables {
    pub fn new(n: usize) -> Self {
        Self {
            a: vec![vec![0.0; n]; n],
            c: vec![vec![0.0; n]; n],
            s: vec![vec![0.0; n]; n],
            p: vec![vec![0.0; n]; n],
            overlaps: vec![vec![false; n]; n],
            symmetry: vec![vec![false; n]; n],
        }
    }

    /// Sets both `(j, k)` and `(k, j)`.
    pub fn pair(m: &mut [Vec<f64>], j: usize, k: usize, v: f64) {
        m[j][k] = v;
        m[k][j] = v;
    }

    pub fn overlap(&mut self, j: usize, k: usize) {
        self.overlaps[j][k] = true;
        self.overlaps[k][j] = true;
    }

    pub fn symmetric(&mut self, j: usize, k: usize) {
        self.symmetry[j][k] = true;
        self.symmetry[k][j] = true;
    }
}

pub fn triplet(upper: usize, middle: usize, lower: usize, d1: f64, d2: f64) -> Triplet {
    Triplet {
        upper,
        middle,
        lower,
        weight: 1.0,
        d1,
        d2,
    }
}

/// Builds an environment at 1 pixel per unit with a glyph spanning rows 0..=20.
pub fn build_env(avails: Vec<Avail>, tables: Tables, triplets: Vec<Triplet>) -> Environment {
    build_env_with(avails, tables, triplets, Strategy::default())
}

pub fn build_env_with(
    avails: Vec<Avail>,
    tables: Tables,
    triplets: Vec<Triplet>,
    strategy: Strategy,
) -> Environment {
    EnvironmentParams::builder()
        .avails(avails)
        .alignment(tables.a)
        .collision(tables.c)
        .swap(tables.s)
        .priority(Some(tables.p))
        .direct_overlaps(tables.overlaps)
        .symmetry(Some(tables.symmetry))
        .triplets(triplets)
        .strategy(strategy)
        .upm(16.0)
        .ppem(16.0)
        .glyph_top_pixels(20)
        .glyph_bottom_pixels(0)
        .build()
        .build_environment()
        .expect("fixture environment should validate")
}

/// A glyph problem document with `n` unconstrained points at the given centers.
pub fn simple_problem(name: &str, centers: &[f64]) -> GlyphProblem {
    let n = centers.len();
    let tables = Tables::new(n);
    GlyphProblem {
        name: name.to_string(),
        upm: 1000.0,
        ppem: 12.0,
        glyph_top_pixels: 20,
        glyph_bottom_pixels: 0,
        no_ablation: false,
        avails: centers.iter().map(|&c| AvailBuilder::new(c).build()).collect(),
        alignment: tables.a,
        collision: tables.c,
        swap: tables.s,
        priority: None,
        direct_overlaps: tables.overlaps,
        symmetry: None,
        triplets: vec![],
        order: None,
        gene: None,
    }
}
