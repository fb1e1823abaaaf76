//! The per-game decision engine.
//!
//! A [`TurnEvaluator`] owns everything one game needs: the belief state, the gene store of the
//! species being played and the move usage counters. Each call to
//! [`select_move`](TurnEvaluator::select_move) folds in the observed board, scores every
//! candidate of every affordable family, and returns the single best move. The reported result
//! of that move goes back in through [`apply_move_result`](TurnEvaluator::apply_move_result).
//!
//! The choice is a greedy one-ply search: there is no lookahead beyond the features each family
//! computes for its own candidates.

use plantation_engine::{
    BeliefState, Grid, Move, MoveKind, MoveOutcome, MoveResultError, MoveUsage, Position,
};
use rand_pcg::Pcg32;

use crate::{
    genes::{GeneStore, GeneVector},
    move_family::propose_all,
    move_selector::{MoveSelector, ProposalSink},
};

#[derive(Debug, Clone)]
pub struct TurnEvaluator {
    belief: BeliefState,
    genes: GeneStore,
    usage: MoveUsage,
    sign: i32,
}

impl TurnEvaluator {
    /// Starts a game with the genes of one species.
    ///
    /// `sign` is our side's sign on the true board (±1). The per-family distance scales are
    /// read from the genes here and stay fixed for the game.
    #[must_use]
    pub fn new(genes: GeneVector, sign: i32, rng: Pcg32) -> Self {
        let mut genes = GeneStore::new(genes, rng);
        let scales = genes.distance_scales();
        Self {
            belief: BeliefState::new(&scales),
            genes,
            usage: MoveUsage::new(),
            sign,
        }
    }

    #[must_use]
    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    #[must_use]
    pub fn genes(&self) -> &GeneVector {
        self.genes.genes()
    }

    #[must_use]
    pub fn usage(&self) -> &MoveUsage {
        &self.usage
    }

    #[must_use]
    pub fn sign(&self) -> i32 {
        self.sign
    }

    /// Feeds every weighted candidate for this turn to `sink` without choosing one.
    pub fn propose_moves(
        &mut self,
        board: &Grid<i32>,
        turn: u32,
        moves_remaining: u32,
        sink: &mut dyn ProposalSink,
    ) {
        self.belief.apply_observed_board(board, turn);
        propose_all(&self.belief, &mut self.genes, moves_remaining, sink);
    }

    /// Chooses the move to play and counts it towards the family usage.
    ///
    /// Returns `None` only if no family has a candidate.
    pub fn select_move(
        &mut self,
        board: &Grid<i32>,
        turn: u32,
        moves_remaining: u32,
    ) -> Option<Move> {
        let mut selector = MoveSelector::new();
        self.propose_moves(board, turn, moves_remaining, &mut selector);
        let mv = selector.into_best_move()?;
        self.usage.record(mv.kind());
        Some(mv)
    }

    /// Folds the reported result of one of our moves into the belief state.
    pub fn apply_move_result(
        &mut self,
        kind: MoveKind,
        turn: u32,
        target: Position,
        result: &str,
    ) -> Result<MoveOutcome, MoveResultError> {
        self.belief
            .apply_move_result(kind, turn, target, result, self.sign)
    }

    /// Ends the game, returning the genes (including any materialised during play) and the
    /// usage counters.
    #[must_use]
    pub fn into_parts(self) -> (GeneVector, MoveUsage) {
        (self.genes.into_genes(), self.usage)
    }
}
