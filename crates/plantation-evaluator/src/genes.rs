//! Named scalar parameters read by the scoring formulas.
//!
//! A [`GeneVector`] is the persisted form: a map from gene name to value. A [`GeneStore`]
//! wraps one vector for the duration of a game and materialises unknown names on first read
//! with a log-uniform random draw ([`random_factor`]). A gene that has been read once keeps its
//! value until the vector is mutated between games.
//!
//! Gene names combine a move family with a feature suffix, e.g. `plantWeight` or
//! `scoutFriendlyDistanceScale`. The names are persisted, so they must stay stable.

use std::collections::{BTreeMap, btree_map};

use plantation_engine::{Allegiance, DistanceScales, MoveKind};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Largest magnitude of a freshly materialised gene.
pub const GENE_MAX: f64 = 10.0;

/// Suffix of the per-family scale genes, after the allegiance (`plantFriendlyDistanceScale`).
pub const DISTANCE_SCALE: &str = "DistanceScale";

/// Gene name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneVector {
    genes: BTreeMap<String, f64>,
}

impl GeneVector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.genes.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.genes.insert(name.into(), value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.genes.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.genes.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, String, f64> {
        self.genes.values_mut()
    }

    /// Copies every gene of `other` whose name is not present yet; existing values win.
    pub fn merge_missing(&mut self, other: &Self) {
        for (name, value) in &other.genes {
            self.genes.entry(name.clone()).or_insert(*value);
        }
    }
}

impl<S> FromIterator<(S, f64)> for GeneVector
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        Self {
            genes: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

/// Draws `±10^u × max / 10` with `u` uniform over `[-1, 1]` in steps of 0.001.
///
/// Magnitudes are log-uniform between `max / 100` and `max`; the sign is a fair coin.
pub fn random_factor<R>(rng: &mut R, max: f64) -> f64
where
    R: Rng + ?Sized,
{
    let exponent = f64::from(rng.random_range(-1000..=1000)) / 1000.0;
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    10f64.powf(exponent) * (max / 10.0) * sign
}

/// A gene vector with lazy, stable materialisation of unknown names.
#[derive(Debug, Clone)]
pub struct GeneStore {
    genes: GeneVector,
    rng: Pcg32,
}

impl GeneStore {
    #[must_use]
    pub fn new(genes: GeneVector, rng: Pcg32) -> Self {
        Self { genes, rng }
    }

    /// Returns the gene `name`, drawing and storing a value first if it has never been read.
    pub fn get(&mut self, name: &str) -> f64 {
        if let Some(value) = self.genes.get(name) {
            return value;
        }
        let value = random_factor(&mut self.rng, GENE_MAX);
        self.genes.insert(name, value);
        value
    }

    /// Returns the gene `{kind}{suffix}`, e.g. `bombKnowledgeAge`.
    pub fn feature(&mut self, kind: MoveKind, suffix: &str) -> f64 {
        self.get(&format!("{kind}{suffix}"))
    }

    /// Per-proposal noise, drawn from the same distribution as a fresh gene.
    pub fn noise(&mut self, max: f64) -> f64 {
        random_factor(&mut self.rng, max)
    }

    /// Reads the `{kind}FriendlyDistanceScale` and `{kind}EnemyDistanceScale` genes of every
    /// family that keeps influence accumulators.
    pub fn distance_scales(&mut self) -> DistanceScales {
        DistanceScales::from_fn(|kind, allegiance: Allegiance| {
            self.feature(kind, &format!("{allegiance}{DISTANCE_SCALE}"))
        })
    }

    #[must_use]
    pub fn genes(&self) -> &GeneVector {
        &self.genes
    }

    #[must_use]
    pub fn into_genes(self) -> GeneVector {
        self.genes
    }
}
