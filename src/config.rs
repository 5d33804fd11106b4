use crate::error::{GfResult, GridFitError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Global tunables shared by every glyph of a run.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    /// Sweep budget for each iterated balancing pass.
    #[arg(long, default_value_t = 16)]
    #[serde(alias = "REBALANCE_PASSES")]
    pub rebalance_passes: usize,

    /// Scale of the triplet proportion-distortion penalty.
    #[arg(long, default_value_t = 5.0)]
    #[serde(alias = "COEFF_DISTORT")]
    pub coeff_distort: f64,

    /// Scale of the soft-bound excursion penalty.
    #[arg(long, default_value_t = 8.0)]
    #[serde(alias = "COEFF_PORPORTION_DISTORTION")]
    pub coeff_proportion_distortion: f64,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            rebalance_passes: 16,
            coeff_distort: 5.0,
            coeff_proportion_distortion: 8.0,
        }
    }
}

impl Strategy {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GridFitError::Config(format!(
                "Failed to read parameter file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let strategy: Strategy = serde_json::from_str(&content)?;
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn validate(&self) -> GfResult<()> {
        if !self.coeff_distort.is_finite() || self.coeff_distort < 0.0 {
            return Err(GridFitError::Config(format!(
                "coeff_distort must be a finite non-negative number, got {}",
                self.coeff_distort
            )));
        }
        if !self.coeff_proportion_distortion.is_finite() || self.coeff_proportion_distortion < 0.0
        {
            return Err(GridFitError::Config(format!(
                "coeff_proportion_distortion must be a finite non-negative number, got {}",
                self.coeff_proportion_distortion
            )));
        }
        Ok(())
    }

    /// Copies every flag the user typed explicitly over the values loaded from a file.
    pub fn merge_from_cli(&mut self, cli: &Strategy, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }

        update_if_present!(rebalance_passes, "rebalance_passes");
        update_if_present!(coeff_distort, "coeff_distort");
        update_if_present!(coeff_proportion_distortion, "coeff_proportion_distortion");
    }
}
