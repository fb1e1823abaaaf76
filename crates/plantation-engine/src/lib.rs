//! Board model for the plantation agent.
//!
//! This crate holds everything the agent knows about the 11×11 board:
//!
//! - [`core`] - Coordinates, dense grids, move families and concrete moves
//! - [`engine`] - The incrementally maintained [`BeliefState`], its lazily recomputed
//!   [`DistanceField`]s, and decoding of reported move outcomes
//!
//! The belief state is the only mutable model of the game. Friendly squares come from the
//! board snapshot handed over each turn; enemy squares are only ever learned through the
//! results of our own moves.
//!
//! # Example
//!
//! ```
//! use plantation_engine::{BeliefState, DistanceScales, Grid, Position};
//!
//! let mut belief = BeliefState::new(&DistanceScales::uniform(0.5, 0.5));
//! let mut board = Grid::filled(0);
//! board[Position::new(5, 0)] = 3;
//! belief.apply_observed_board(&board, 1);
//!
//! assert_eq!(belief.friendly_score(), 3);
//! assert_eq!(belief.friendly_distance(Position::new(5, 2)), 2);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("position ({x}, {y}) is outside the board")]
pub struct PositionError {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected a {expected}x{expected} board, found {rows} rows with a {columns}-cell row")]
pub struct GridShapeError {
    pub expected: usize,
    pub rows: usize,
    pub columns: usize,
}
