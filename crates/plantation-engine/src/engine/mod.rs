//! Belief-state maintenance.
//!
//! - [`BeliefState`] - Friendly strengths, signed enemy estimates, knowledge dates, running
//!   scores and per-family distance-weighted influence accumulators
//! - [`DistanceField`] - Lazily recomputed multi-source shortest-path distances
//! - [`MoveOutcome`] - Decoded result of one of our moves, folded back into the belief state
//! - [`MoveUsage`] - How often each move family was chosen during a game
//!
//! # Update Flow
//!
//! 1. Each turn the observed board is folded in with [`BeliefState::apply_observed_board`]
//! 2. Move generators read strengths, accumulators and distances
//! 3. The reported result of the chosen move is folded in with
//!    [`BeliefState::apply_move_result`]
//!
//! All aggregates are maintained by delta on every square update; nothing is rescanned.

pub use self::{belief_state::*, distance_field::*, move_outcome::*, move_usage::*};

mod belief_state;
mod distance_field;
mod move_outcome;
mod move_usage;
