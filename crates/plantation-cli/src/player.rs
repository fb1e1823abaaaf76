//! Process-wide session state behind the transport.
//!
//! A process plays as one agent name, fixed by the first `init`. `start_game` reads the lineage
//! of that name from disk and binds the scheduled species to a fresh [`TurnEvaluator`];
//! `end_game` folds the result back into the lineage and writes it to disk.

use anyhow::Context;
use chrono::Utc;
use plantation_engine::{Grid, Position};
use plantation_evaluator::turn_evaluator::TurnEvaluator;
use plantation_training::{
    fitness::GameOutcome,
    genetic::{EvolutionEngine, EvolutionParams},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use tracing::{debug, info, trace, warn};

use crate::{
    protocol::{Request, Response},
    store::LineageStore,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum SessionError {
    #[display("start_game received before init")]
    NotInitialized,
    #[display("{function} received outside a game")]
    NoGame { function: &'static str },
    #[display("move position {pos:?} needs at least two coordinates")]
    ShortPosition { pos: Vec<i64> },
    #[display("no move family has a candidate on turn {turn}")]
    NoCandidate { turn: u32 },
}

#[derive(Debug)]
struct Game {
    slot: usize,
    evaluator: TurnEvaluator,
    engine: EvolutionEngine,
}

#[derive(Debug)]
pub(crate) struct Player {
    store: LineageStore,
    params: EvolutionParams,
    rng: Pcg32,
    name: Option<String>,
    game: Option<Game>,
}

impl Player {
    pub(crate) fn new(store: LineageStore, params: EvolutionParams, rng: Pcg32) -> Self {
        Self {
            store,
            params,
            rng,
            name: None,
            game: None,
        }
    }

    pub(crate) fn handle(&mut self, request: Request) -> anyhow::Result<Response> {
        let function = request.function();
        match request {
            Request::Init { name } => self.init(name)?,
            Request::StartGame { sign } => self.start_game(sign)?,
            Request::GetMove {
                board,
                turn,
                moves_remaining,
                time_remaining,
            } => {
                trace!(turn, moves_remaining, time_remaining, "get_move");
                let game = self.game.as_mut().ok_or(SessionError::NoGame { function })?;
                let board = Grid::try_from(board)
                    .with_context(|| format!("Invalid board on turn {turn}"))?;
                let mv = game
                    .evaluator
                    .select_move(&board, turn, moves_remaining)
                    .ok_or(SessionError::NoCandidate { turn })?;
                debug!(turn, moves_remaining, %mv, "chose move");
                return Ok(Response::Move(mv));
            }
            Request::HandleMoveResult {
                kind,
                turn,
                pos,
                result,
            } => {
                let game = self.game.as_mut().ok_or(SessionError::NoGame { function })?;
                let (Some(&x), Some(&y)) = (pos.first(), pos.get(1)) else {
                    return Err(SessionError::ShortPosition { pos }.into());
                };
                let target = Position::try_new(x, y)?;
                let outcome = game
                    .evaluator
                    .apply_move_result(kind, turn, target, &result)
                    .with_context(|| format!("Move {kind} at {target} on turn {turn} failed"))?;
                trace!(turn, %kind, %target, ?outcome, "applied move result");
            }
            Request::EndGame {
                your_score,
                opponent_score,
            } => self.end_game(GameOutcome {
                your_score,
                opponent_score,
            })?,
        }
        Ok(Response::Ack)
    }

    fn init(&mut self, name: String) -> anyhow::Result<()> {
        if let Some(current) = &self.name {
            debug!("already playing as {current}, ignoring init as {name}");
            return Ok(());
        }
        info!("playing as {name}");
        self.name = Some(name);
        Ok(())
    }

    /// Loads the lineage afresh, so games saved by other processes under the same name count.
    fn start_game(&mut self, sign: i32) -> anyhow::Result<()> {
        let name = self.name.as_deref().ok_or(SessionError::NotInitialized)?;
        let lineage = self.store.load(name)?;
        let population_size = self.params.population_size;
        if !lineage.species.is_empty() && lineage.species.len() != population_size {
            warn!(
                "lineage {name} has {} species, expected {population_size}",
                lineage.species.len()
            );
        }
        let engine = EvolutionEngine::new(lineage, self.params.clone());
        let slot = engine.scheduled_species();
        let genes = engine.lineage().genes_of(slot);
        info!(
            "{name} starts a game with species {slot} ({} genes), sign {sign}",
            genes.len()
        );
        let rng = Pcg32::from_rng(&mut self.rng);
        self.game = Some(Game {
            slot,
            evaluator: TurnEvaluator::new(genes, sign, rng),
            engine,
        });
        Ok(())
    }

    fn end_game(&mut self, outcome: GameOutcome) -> anyhow::Result<()> {
        let Game {
            slot,
            evaluator,
            mut engine,
        } = self
            .game
            .take()
            .ok_or(SessionError::NoGame { function: "end_game" })?;
        let name = self.name.as_deref().ok_or(SessionError::NotInitialized)?;
        let (genes, usage) = evaluator.into_parts();
        debug!("snapshot of moves used: {usage}");
        info!(
            "{name} finished a game with species {slot}: {} to {}",
            outcome.your_score, outcome.opponent_score
        );

        engine.record_game(slot, &genes, &outcome, &usage, &mut self.rng);
        engine.lineage_mut().updated_at = Some(Utc::now());
        self.store.save(name, engine.lineage())
    }
}
