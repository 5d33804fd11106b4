pub mod balance;
pub mod evaluate;

use gridfit::problem::{GlyphProblem, ProblemSet};

/// Glyphs selected by an optional case-insensitive name filter.
pub fn select<'a>(set: &'a ProblemSet, filter: &Option<String>) -> Vec<&'a GlyphProblem> {
    set.glyphs
        .iter()
        .filter(|g| match filter {
            Some(f) => g.name.to_lowercase().contains(&f.to_lowercase()),
            None => true,
        })
        .collect()
}
