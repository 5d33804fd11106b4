use crate::api::FitResult;
use crate::config::Strategy;
use crate::environment::{Environment, EnvironmentParams};
use crate::error::GfResult;
use crate::model::{Avail, Triplet};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::info;

/// One glyph's constraint model as produced by the upstream stem analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphProblem {
    pub name: String,
    pub upm: f64,
    pub ppem: f64,
    #[serde(alias = "glyphTopPixels")]
    pub glyph_top_pixels: i32,
    #[serde(alias = "glyphBottomPixels")]
    pub glyph_bottom_pixels: i32,
    #[serde(default, alias = "noAblation")]
    pub no_ablation: bool,

    pub avails: Vec<Avail>,
    #[serde(alias = "A")]
    pub alignment: Vec<Vec<f64>>,
    #[serde(alias = "C")]
    pub collision: Vec<Vec<f64>>,
    #[serde(alias = "S")]
    pub swap: Vec<Vec<f64>>,
    #[serde(default, alias = "P")]
    pub priority: Option<Vec<Vec<f64>>>,
    #[serde(alias = "directOverlaps")]
    pub direct_overlaps: Vec<Vec<bool>>,
    #[serde(default)]
    pub symmetry: Option<Vec<Vec<bool>>>,
    #[serde(default)]
    pub triplets: Vec<Triplet>,

    /// Point visiting order for the point-wise pass. Accepts bare indices or the upstream
    /// `[length, index]` pairs.
    #[serde(default, alias = "availsByLength", deserialize_with = "visiting_order")]
    pub order: Option<Vec<usize>>,
    /// Starting assignment. Rounded centers when absent.
    #[serde(default)]
    pub gene: Option<Vec<i32>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderEntry {
    Index(usize),
    Ranked(f64, usize),
}

fn visiting_order<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<usize>>, D::Error> {
    let entries = Option::<Vec<OrderEntry>>::deserialize(d)?;
    Ok(entries.map(|list| {
        list.into_iter()
            .map(|e| match e {
                OrderEntry::Index(i) | OrderEntry::Ranked(_, i) => i,
            })
            .collect()
    }))
}

impl GlyphProblem {
    pub fn environment(&self, strategy: &Strategy) -> GfResult<Environment> {
        EnvironmentParams::builder()
            .avails(self.avails.clone())
            .alignment(self.alignment.clone())
            .collision(self.collision.clone())
            .swap(self.swap.clone())
            .priority(self.priority.clone())
            .direct_overlaps(self.direct_overlaps.clone())
            .symmetry(self.symmetry.clone())
            .triplets(self.triplets.clone())
            .order(self.order.clone())
            .strategy(strategy.clone())
            .upm(self.upm)
            .ppem(self.ppem)
            .glyph_top_pixels(self.glyph_top_pixels)
            .glyph_bottom_pixels(self.glyph_bottom_pixels)
            .no_ablation(self.no_ablation)
            .build()
            .build_environment()
    }

    /// The supplied gene, or rounded centers, checked against `env`.
    pub fn starting_gene(&self, env: &Environment) -> GfResult<Vec<i32>> {
        let gene = match &self.gene {
            Some(g) => g.clone(),
            None => env.initial_gene(),
        };
        env.check_gene(&gene)?;
        Ok(gene)
    }
}

/// A batch of glyphs sharing one strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemSet {
    #[serde(default)]
    pub strategy: Option<Strategy>,
    pub glyphs: Vec<GlyphProblem>,
}

impl ProblemSet {
    pub fn from_reader<R: Read>(reader: R) -> GfResult<Self> {
        let set: ProblemSet = serde_json::from_reader(reader)?;
        if let Some(strategy) = &set.strategy {
            strategy.validate()?;
        }
        Ok(set)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GfResult<Self> {
        let path = path.as_ref();
        let set = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("Loaded {} glyphs from {}", set.glyphs.len(), path.display());
        Ok(set)
    }

    pub fn find(&self, name: &str) -> Option<&GlyphProblem> {
        self.glyphs.iter().find(|g| g.name == name)
    }
}

#[derive(Serialize)]
struct AssignmentRow<'a> {
    glyph: &'a str,
    point: usize,
    row: i32,
}

/// Writes finalized rows as `glyph,point,row` records.
pub fn write_assignments_csv<W: Write>(results: &[FitResult], writer: W) -> GfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        for (point, &row) in result.gene.iter().enumerate() {
            wtr.serialize(AssignmentRow {
                glyph: &result.glyph,
                point,
                row,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_results_json<W: Write>(results: &[FitResult], writer: W) -> GfResult<()> {
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}
