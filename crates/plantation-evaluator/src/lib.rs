//! Gene-weighted move selection for the plantation agent.
//!
//! Every turn the agent scores each legal candidate of each move family with a linear
//! combination of board features and keeps the best one:
//!
//! ```text
//! weight = Σ(featureᵢ × geneᵢ)        per-family features (move_family)
//!        + template_bias(family)      game progress and score terms (score)
//!        + noise                      log-uniform, |noise| ≤ 2
//! ```
//!
//! # Modules
//!
//! - [`genes`] - [`GeneVector`](genes::GeneVector) and the lazily materialising
//!   [`GeneStore`](genes::GeneStore)
//! - [`score`] - Shared template terms and gene-name suffixes
//! - [`move_family`] - Candidate generation and feature weights for the six families
//! - [`move_selector`] - The running-best rule and the [`ProposalSink`](move_selector::ProposalSink)
//!   seam
//! - [`turn_evaluator`] - [`TurnEvaluator`](turn_evaluator::TurnEvaluator), the per-game engine
//!   object
//!
//! # Example
//!
//! ```
//! use plantation_engine::{Grid, Position};
//! use plantation_evaluator::{genes::GeneVector, turn_evaluator::TurnEvaluator};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut evaluator = TurnEvaluator::new(GeneVector::new(), 1, Pcg32::seed_from_u64(0));
//! let mut board = Grid::filled(0);
//! board[Position::new(5, 0)] = 3;
//!
//! let mv = evaluator.select_move(&board, 1, 3).unwrap();
//! assert_eq!(evaluator.usage().count(mv.kind()), 1);
//! ```
//!
//! Genes that are read for the first time are drawn at random, so a fresh
//! [`GeneVector`](genes::GeneVector) plays a random but internally consistent strategy. The
//! genes are tuned across games by the `plantation-training` crate.

pub mod genes;
pub mod move_family;
pub mod move_selector;
pub mod score;
pub mod turn_evaluator;
