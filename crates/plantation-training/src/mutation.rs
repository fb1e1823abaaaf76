//! Multiplicative gene mutation.
//!
//! Each gene is picked independently with [`MutationParams::selection_probability`]. A picked
//! gene is multiplied by `1 + p / 100`, with `p` an integer percentage drawn either from the
//! wide "big" range or the narrow "small" range. The big range reaches −200 %, so a big jump
//! can flip the sign of a gene. Values that end up negligibly small snap to exactly 0, which
//! switches the feature off for good: a stored 0 is never redrawn.

use std::ops::RangeInclusive;

use plantation_evaluator::genes::GeneVector;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct MutationParams {
    pub selection_probability: f64,
    pub big_jitter_probability: f64,
    pub big_jitter_percent: RangeInclusive<i32>,
    pub small_jitter_percent: RangeInclusive<i32>,
    pub zero_snap_threshold: f64,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            selection_probability: 0.2,
            big_jitter_probability: 0.25,
            big_jitter_percent: -200..=100,
            small_jitter_percent: -33..=50,
            zero_snap_threshold: 1e-6,
        }
    }
}

/// Returns a mutated copy of `genes`.
pub fn mutate<R>(genes: &GeneVector, params: &MutationParams, rng: &mut R) -> GeneVector
where
    R: Rng + ?Sized,
{
    let mut genes = genes.clone();
    for value in genes.values_mut() {
        if !rng.random_bool(params.selection_probability) {
            continue;
        }
        let percent = if rng.random_bool(params.big_jitter_probability) {
            rng.random_range(params.big_jitter_percent.clone())
        } else {
            rng.random_range(params.small_jitter_percent.clone())
        };
        *value *= 1.0 + f64::from(percent) / 100.0;
        if value.abs() < params.zero_snap_threshold {
            *value = 0.0;
        }
    }
    genes
}
