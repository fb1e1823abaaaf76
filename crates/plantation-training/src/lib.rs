//! Evolution of the gene vectors that drive the plantation agent.
//!
//! The agent plays one game per process, so training happens incrementally: every game adds
//! its fitness to the species that played it, and the population evolves once every species
//! has played enough games. The whole state lives in a [`Lineage`](lineage::Lineage) that is
//! persisted between games.
//!
//! # Architecture
//!
//! ```text
//! Lineage (persisted population + counters)
//!     ↓ schedules
//! Species gene vector
//!     ↓ drives
//! TurnEvaluator (plantation-evaluator), one game
//!     ↓ produces
//! Game outcome + move usage
//!     ↓ scored by
//! Fitness (score difference − usage penalty)
//!     ↓ accumulated by
//! EvolutionEngine → selection & mutation
//! ```
//!
//! # Modules
//!
//! - [`lineage`] - The persisted population and its serde layout
//! - [`fitness`] - Per-game fitness from final scores and move usage
//! - [`mutation`] - Multiplicative per-gene jitter
//! - [`genetic`] - Round-robin bookkeeping and elitist selection
//!
//! # Fitness
//!
//! A game is worth `|your score| − |opponent score|`, minus 10 for every time a move family
//! fell short of five uses. The penalty keeps the population from converging on strategies
//! that never use some of the moves.
//!
//! # Current Limitations
//!
//! - **Noisy fitness**: Each species plays only a handful of games per period against whatever
//!   opponent the game server pairs it with.
//! - **No crossover**: Offspring are mutated copies of a single survivor, so good genes found by
//!   different survivors never combine.

pub mod fitness;
pub mod genetic;
pub mod lineage;
pub mod mutation;
