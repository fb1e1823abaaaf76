//! The persisted population of one agent name.

use chrono::{DateTime, Utc};
use plantation_evaluator::genes::GeneVector;
use serde::{Deserialize, Serialize};

/// One gene vector and the fitness it has accumulated in the current evolution period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Species {
    pub genes: GeneVector,
    #[serde(alias = "scorediff")]
    pub fitness: i64,
}

/// Population plus round-robin and generation counters.
///
/// Every field defaults, so an empty document (or `{}`) bootstraps a fresh lineage.
///
/// ```
/// use plantation_training::lineage::Lineage;
///
/// let lineage: Lineage = serde_json::from_str(r#"{"nextSpeciesToPlay": 3}"#).unwrap();
/// assert_eq!(lineage.next_species_to_play, 3);
/// assert!(lineage.species.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lineage {
    pub next_species_to_play: usize,
    pub rounds_played: u32,
    #[serde(alias = "generations")]
    pub generation: u32,
    pub species: Vec<Species>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lineage {
    /// Slot of the species whose turn it is to play.
    #[must_use]
    pub fn scheduled_species(&self, population_size: usize) -> usize {
        self.next_species_to_play % population_size
    }

    /// The genes of slot `index`, empty if the slot has never been filled.
    #[must_use]
    pub fn genes_of(&self, index: usize) -> GeneVector {
        self.species
            .get(index)
            .map(|species| species.genes.clone())
            .unwrap_or_default()
    }

    /// Returns slot `index`, creating empty species up to it if needed.
    pub fn species_mut(&mut self, index: usize) -> &mut Species {
        if self.species.len() <= index {
            self.species.resize_with(index + 1, Species::default);
        }
        &mut self.species[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lineage {
        Lineage {
            next_species_to_play: 4,
            rounds_played: 7,
            generation: 12,
            species: vec![
                Species {
                    genes: GeneVector::from_iter([("plantWeight", 1.25), ("bombWeight", -0.5)]),
                    fitness: -40,
                },
                Species {
                    genes: GeneVector::from_iter([("scoutWeight", 0.0)]),
                    fitness: 15,
                },
            ],
            updated_at: None,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let lineage = sample();
        let json = serde_json::to_string_pretty(&lineage).unwrap();
        assert!(json.contains("\"nextSpeciesToPlay\": 4"));
        assert!(json.contains("\"roundsPlayed\": 7"));
        assert!(!json.contains("updatedAt"));
        let decoded: Lineage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, lineage);
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{
            "nextSpeciesToPlay": 1,
            "roundsPlayed": 2,
            "generations": 3,
            "species": [{"genes": {"plantWeight": 2.5}, "scorediff": -17}]
        }"#;
        let lineage: Lineage = serde_json::from_str(json).unwrap();
        assert_eq!(lineage.generation, 3);
        assert_eq!(lineage.species[0].fitness, -17);
        assert_eq!(lineage.species[0].genes.get("plantWeight"), Some(2.5));
    }

    #[test]
    fn test_missing_fields_default() {
        let lineage: Lineage = serde_json::from_str(r#"{"species": [{}]}"#).unwrap();
        assert_eq!(lineage.next_species_to_play, 0);
        assert_eq!(lineage.rounds_played, 0);
        assert_eq!(lineage.generation, 0);
        assert_eq!(lineage.species, vec![Species::default()]);
    }

    #[test]
    fn test_species_slots_grow_on_demand() {
        let mut lineage = sample();
        assert!(lineage.genes_of(5).is_empty());
        lineage.species_mut(5).fitness = 3;
        assert_eq!(lineage.species.len(), 6);
        assert_eq!(lineage.species[4], Species::default());
        assert_eq!(lineage.scheduled_species(10), 4);
        assert_eq!(lineage.scheduled_species(3), 1);
    }
}
