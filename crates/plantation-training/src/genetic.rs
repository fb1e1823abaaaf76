//! Elitist evolution of a [`Lineage`].
//!
//! Species take turns: every game plays the species in slot `nextSpeciesToPlay`, and the
//! game's fitness is added to that slot. Once every slot has played
//! [`EvolutionParams::rounds_per_evolution`] times the population evolves:
//!
//! 1. **Selection** - The two species with the highest accumulated fitness survive
//! 2. **Elitism** - The survivors move unchanged into slots 0 and 1
//! 3. **Mutation** - Every other slot `i` receives a mutated copy of survivor `i % 2`
//! 4. **Reset** - All fitness counters return to 0 and the generation counter advances
//!
//! There is no crossover: each offspring descends from exactly one survivor.
//!
//! # Example
//!
//! ```
//! use plantation_engine::MoveUsage;
//! use plantation_evaluator::genes::GeneVector;
//! use plantation_training::{
//!     fitness::GameOutcome,
//!     genetic::{EvolutionEngine, EvolutionParams},
//!     lineage::Lineage,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let mut engine = EvolutionEngine::new(Lineage::default(), EvolutionParams::default());
//! let slot = engine.scheduled_species();
//! let outcome = GameOutcome { your_score: 30, opponent_score: 20 };
//! let usage = MoveUsage::new();
//! let report = engine.record_game(slot, &GeneVector::new(), &outcome, &usage, &mut rng);
//!
//! assert!(report.is_none());
//! assert_eq!(engine.lineage().next_species_to_play, 1);
//! ```

use plantation_engine::MoveUsage;
use plantation_evaluator::genes::GeneVector;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    fitness::{GameOutcome, game_fitness},
    lineage::{Lineage, Species},
    mutation::{MutationParams, mutate},
};

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionParams {
    /// Number of species in the lineage
    pub population_size: usize,
    /// Full passes over the population between two evolutions
    pub rounds_per_evolution: u32,
    /// Minimum number of uses per family before the usage penalty stops
    pub usage_target: u32,
    /// Fitness lost per missing use of a family
    pub usage_penalty: i64,
    pub mutation: MutationParams,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 10,
            rounds_per_evolution: 10,
            usage_target: 5,
            usage_penalty: 10,
            mutation: MutationParams::default(),
        }
    }
}

/// Summary of one evolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionReport {
    pub generation: u32,
    /// Previous slots of the two survivors, best first
    pub survivors: [usize; 2],
    pub survivor_fitness: [i64; 2],
}

#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    lineage: Lineage,
    params: EvolutionParams,
}

impl EvolutionEngine {
    /// # Panics
    ///
    /// Panics if the population has fewer than two species.
    #[must_use]
    pub fn new(lineage: Lineage, params: EvolutionParams) -> Self {
        assert!(params.population_size >= 2);
        Self { lineage, params }
    }

    #[must_use]
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    #[must_use]
    pub fn lineage_mut(&mut self) -> &mut Lineage {
        &mut self.lineage
    }

    #[must_use]
    pub fn into_lineage(self) -> Lineage {
        self.lineage
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// Slot of the species that plays the next game.
    #[must_use]
    pub fn scheduled_species(&self) -> usize {
        self.lineage.scheduled_species(self.params.population_size)
    }

    /// Records a finished game of the species in `slot` and advances the round robin.
    ///
    /// `genes` are the genes the species played with, including those materialised during
    /// the game; they are merged into the slot without overwriting existing values. Returns
    /// a report if the game completed an evolution period.
    pub fn record_game<R>(
        &mut self,
        slot: usize,
        genes: &GeneVector,
        outcome: &GameOutcome,
        usage: &MoveUsage,
        rng: &mut R,
    ) -> Option<EvolutionReport>
    where
        R: Rng + ?Sized,
    {
        let fitness = game_fitness(
            outcome,
            usage,
            self.params.usage_target,
            self.params.usage_penalty,
        );
        debug!(slot, fitness, %usage, "recording game");

        let species = self.lineage.species_mut(slot);
        species.genes.merge_missing(genes);
        species.fitness += fitness;

        let lineage = &mut self.lineage;
        lineage.next_species_to_play += 1;
        if lineage.next_species_to_play < self.params.population_size {
            return None;
        }
        lineage.next_species_to_play = 0;
        lineage.rounds_played += 1;
        if lineage.rounds_played < self.params.rounds_per_evolution {
            return None;
        }
        lineage.rounds_played = 0;
        Some(self.evolve(rng))
    }

    /// Replaces the population with the two fittest species and their mutated copies.
    pub fn evolve<R>(&mut self, rng: &mut R) -> EvolutionReport
    where
        R: Rng + ?Sized,
    {
        let population_size = self.params.population_size;
        let species = &mut self.lineage.species;
        species.resize_with(population_size, Species::default);

        let [top, second] = select_top_two(species);
        let survivors = [species[top].clone(), species[second].clone()];
        let survivor_fitness = [survivors[0].fitness, survivors[1].fitness];

        for (slot, species) in species.iter_mut().enumerate() {
            let parent = &survivors[slot % 2];
            *species = if slot < 2 {
                parent.clone()
            } else {
                Species {
                    genes: mutate(&parent.genes, &self.params.mutation, rng),
                    fitness: 0,
                }
            };
            species.fitness = 0;
        }

        self.lineage.generation += 1;
        let generation = self.lineage.generation;
        info!("evolved to generation {generation}; top species were {top} and {second}");
        EvolutionReport {
            generation,
            survivors: [top, second],
            survivor_fitness,
        }
    }
}

/// Indices of the two fittest species, best first.
///
/// A single pass with strict comparisons, so among equal fitness the lower index ranks higher.
///
/// # Panics
///
/// Panics if `species` has fewer than two entries.
#[must_use]
pub fn select_top_two(species: &[Species]) -> [usize; 2] {
    assert!(species.len() >= 2);
    let mut top: Option<(usize, i64)> = None;
    let mut second: Option<(usize, i64)> = None;
    for (i, s) in species.iter().enumerate() {
        if top.is_none_or(|(_, best)| s.fitness > best) {
            second = top;
            top = Some((i, s.fitness));
        } else if second.is_none_or(|(_, runner_up)| s.fitness > runner_up) {
            second = Some((i, s.fitness));
        }
    }
    match (top, second) {
        (Some((top, _)), Some((second, _))) => [top, second],
        _ => unreachable!("at least two species were scanned"),
    }
}

#[cfg(test)]
mod tests {
    use plantation_engine::MoveKind;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn species(fitness: &[i64]) -> Vec<Species> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Species {
                genes: GeneVector::from_iter([
                    (format!("id{i}"), 1.0),
                    ("shared".to_owned(), f64::from(u32::try_from(i).unwrap()) + 1.0),
                ]),
                fitness,
            })
            .collect()
    }

    fn balanced_usage() -> MoveUsage {
        let mut usage = MoveUsage::new();
        for kind in MoveKind::ALL {
            for _ in 0..5 {
                usage.record(kind);
            }
        }
        usage
    }

    #[test]
    fn test_select_top_two() {
        assert_eq!(select_top_two(&species(&[3, 9, 1, 7, 9])), [1, 4]);
        assert_eq!(select_top_two(&species(&[5, 5, 5])), [0, 1]);
        assert_eq!(select_top_two(&species(&[-10, -20, -5])), [2, 0]);
        assert_eq!(select_top_two(&species(&[8, 2, 1, 0])), [0, 1]);
    }

    #[test]
    fn test_evolve_keeps_survivors_and_alternates_offspring() {
        let fitness = [4, -2, 30, 0, 11, 30, -7, 1, 2, 3];
        let lineage = Lineage {
            species: species(&fitness),
            ..Lineage::default()
        };
        let params = EvolutionParams {
            mutation: MutationParams {
                selection_probability: 0.0,
                ..MutationParams::default()
            },
            ..EvolutionParams::default()
        };
        let original = lineage.species.clone();
        let mut engine = EvolutionEngine::new(lineage, params);
        let report = engine.evolve(&mut Pcg32::seed_from_u64(0));

        assert_eq!(report.survivors, [2, 5]);
        assert_eq!(report.survivor_fitness, [30, 30]);
        assert_eq!(report.generation, 1);

        let evolved = &engine.lineage().species;
        assert_eq!(evolved.len(), 10);
        for (slot, species) in evolved.iter().enumerate() {
            let parent = if slot % 2 == 0 { 2 } else { 5 };
            assert_eq!(species.genes, original[parent].genes, "slot {slot}");
            assert_eq!(species.fitness, 0);
        }
    }

    #[test]
    fn test_offspring_only_scale_parent_genes() {
        let lineage = Lineage {
            species: species(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]),
            ..Lineage::default()
        };
        let mut engine = EvolutionEngine::new(lineage, EvolutionParams::default());
        engine.evolve(&mut Pcg32::seed_from_u64(5));

        let evolved = &engine.lineage().species;
        // survivors were slots 9 and 8
        assert!(evolved[0].genes.contains("id9"));
        assert!(evolved[1].genes.contains("id8"));
        for (slot, species) in evolved.iter().enumerate().skip(2) {
            let parent = &evolved[slot % 2];
            assert_eq!(species.genes.len(), parent.genes.len());
            for (name, value) in species.genes.iter() {
                let factor = value / parent.genes.get(name).unwrap();
                assert!((-1.0 - 1e-9..=2.0 + 1e-9).contains(&factor), "{name}: {factor}");
            }
        }
    }

    #[test]
    fn test_round_robin_triggers_evolution() {
        let params = EvolutionParams {
            population_size: 3,
            rounds_per_evolution: 2,
            ..EvolutionParams::default()
        };
        let mut engine = EvolutionEngine::new(Lineage::default(), params);
        let mut rng = Pcg32::seed_from_u64(7);
        let usage = balanced_usage();

        let mut reports = Vec::new();
        for game in 0..6 {
            let slot = engine.scheduled_species();
            assert_eq!(slot, game % 3);
            let outcome = GameOutcome {
                your_score: i64::try_from(slot).unwrap() * 10,
                opponent_score: 0,
            };
            let genes = GeneVector::from_iter([(format!("slot{slot}"), 1.0)]);
            reports.push(engine.record_game(slot, &genes, &outcome, &usage, &mut rng));
            if game == 2 {
                assert_eq!(engine.lineage().rounds_played, 1);
                assert_eq!(engine.lineage().next_species_to_play, 0);
            }
        }

        assert!(reports[..5].iter().all(Option::is_none));
        let report = reports[5].unwrap();
        assert_eq!(report.survivors, [2, 1]);
        assert_eq!(report.survivor_fitness, [40, 20]);

        let lineage = engine.lineage();
        assert_eq!(lineage.generation, 1);
        assert_eq!(lineage.rounds_played, 0);
        assert_eq!(lineage.next_species_to_play, 0);
        assert!(lineage.species.iter().all(|s| s.fitness == 0));
        assert!(lineage.species[0].genes.contains("slot2"));
    }

    #[test]
    fn test_record_game_merges_new_genes() {
        let lineage = Lineage {
            species: vec![Species {
                genes: GeneVector::from_iter([("plantWeight", 1.0)]),
                fitness: 5,
            }],
            ..Lineage::default()
        };
        let mut engine = EvolutionEngine::new(lineage, EvolutionParams::default());
        let played = GeneVector::from_iter([("plantWeight", 9.0), ("bombWeight", -2.0)]);
        let outcome = GameOutcome {
            your_score: 10,
            opponent_score: 4,
        };
        engine.record_game(0, &played, &outcome, &balanced_usage(), &mut Pcg32::seed_from_u64(0));

        let species = &engine.lineage().species[0];
        assert_eq!(species.genes.get("plantWeight"), Some(1.0));
        assert_eq!(species.genes.get("bombWeight"), Some(-2.0));
        assert_eq!(species.fitness, 11);
        assert_eq!(engine.lineage().next_species_to_play, 1);
    }
}
