pub mod matrix;

pub use self::matrix::PairMatrix;

use serde::{Deserialize, Deserializer, Serialize};

/// One hintable stem edge or extremum. Index-stable for the whole optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avail {
    /// Clearance (in rows) the stroke attached to this point needs below it.
    #[serde(alias = "properWidth")]
    pub proper_width: i32,
    pub low: i32,
    pub high: i32,
    #[serde(alias = "softLow")]
    pub soft_low: i32,
    #[serde(alias = "softHigh")]
    pub soft_high: i32,
    pub center: f64,
    #[serde(default, alias = "ablationCoeff")]
    pub ablation_coeff: f64,

    /// Diagonal stroke grouping. Points sharing a region keep their sub-pixel offset.
    /// Region 0 means "no region".
    #[serde(default, alias = "rid", deserialize_with = "nonzero_region")]
    pub region_id: Option<u32>,

    // Original outline position, stroke width and pixel-space position
    #[serde(default)]
    pub y0: f64,
    #[serde(default)]
    pub w0: f64,
    #[serde(default, alias = "y0px")]
    pub y0_px: f64,

    #[serde(default, alias = "atGlyphBottom")]
    pub at_glyph_bottom: bool,
    #[serde(default, alias = "atGlyphTop")]
    pub at_glyph_top: bool,
}

impl Avail {
    #[inline(always)]
    pub fn is_boundary(&self) -> bool {
        self.at_glyph_bottom || self.at_glyph_top
    }

    #[inline(always)]
    pub fn shares_region(&self, other: &Avail) -> bool {
        matches!((self.region_id, other.region_id), (Some(a), Some(b)) if a != 0 && a == b)
    }

    /// Rounded center pulled into the hard bounds.
    pub fn rounded_center(&self) -> i32 {
        (self.center.round() as i32).clamp(self.low, self.high)
    }
}

fn nonzero_region<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<u32>::deserialize(d)?.filter(|&id| id != 0))
}

/// Three vertically ordered points whose spacing proportion is scored.
///
/// `upper` sits above `middle`, which sits above `lower` in the design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    pub upper: usize,
    pub middle: usize,
    pub lower: usize,
    /// Carried for interchange only. Distortion is weighted by the `C` entries of both pairs.
    #[serde(default)]
    pub weight: f64,
    /// Design-space gap between `upper` and `middle`.
    pub d1: f64,
    /// Design-space gap between `middle` and `lower`.
    pub d2: f64,
}

impl Triplet {
    #[inline(always)]
    pub fn indices(&self) -> (usize, usize, usize) {
        (self.upper, self.middle, self.lower)
    }
}
