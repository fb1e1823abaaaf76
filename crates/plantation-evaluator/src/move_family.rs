//! Candidate generation and scoring, one [`MoveFamily`] per move kind.
//!
//! Every family scans the board (`x` outer, `y` inner), filters the cells where its move makes
//! sense and hands each candidate to a [`Proposer`] with a weight built from gene-scaled
//! features:
//!
//! | family | candidates | features |
//! |---|---|---|
//! | plant | unknown cells bordering one of ours | influence, enemy distance, home bias |
//! | fertilise | our cells | influence, enemy distance, home bias |
//! | scout | interior cells (3×3 block fits) | unknown count, knowledge age, influence, both distances, home bias |
//! | colonise | unknown cells at friendly distance > 1, per donor of strength > 1 | influence, both distances, home bias, donor strength |
//! | spray | cells whose cross-shaped enemy sum is positive | enemy sum, friendly distance, home bias |
//! | bomb | cells with a positive enemy estimate | enemy estimate, knowledge age, friendly distance, influence, home bias |
//!
//! Every family also has a constant `Weight` gene, and the proposer adds the game-progress
//! [`template_bias`] and a little noise.

use std::fmt;

use plantation_engine::{
    Allegiance, BeliefState, MOVE_KIND_COUNT, Move, MoveKind, Position, StartingColumn,
};

use crate::{
    genes::GeneStore,
    move_selector::ProposalSink,
    score::{
        ENEMY_DISTANCE, ENEMY_DISTANCE_WEIGHT, ENEMY_SCORE_FEATURE, FRIENDLY_DISTANCE,
        FRIENDLY_DISTANCE_WEIGHT, KNOWLEDGE_AGE, NOISE_MAX, SOURCE_POINTS, UNKNOWN_SQUARE_COUNT,
        WEIGHT, Y_POSITION_FROM_ENEMY_SIDE, Y_POSITION_FROM_MY_SIDE, template_bias,
    },
};

/// All families, in proposal order.
pub const ALL_MOVE_FAMILIES: [&dyn MoveFamily; MOVE_KIND_COUNT] = [
    &PlantFamily,
    &FertiliseFamily,
    &ScoutFamily,
    &ColoniseFamily,
    &SprayFamily,
    &BombFamily,
];

pub trait MoveFamily: fmt::Debug + Send + Sync {
    fn kind(&self) -> MoveKind;

    /// Hands every candidate of this family to `proposer`.
    fn propose_moves(&self, proposer: &mut Proposer<'_>);
}

/// Runs every family whose move fits in `moves_remaining`.
///
/// Colonise, spray and bomb cost two moves, so they are skipped on the last move of a turn.
pub fn propose_all(
    belief: &BeliefState,
    genes: &mut GeneStore,
    moves_remaining: u32,
    sink: &mut dyn ProposalSink,
) {
    for family in ALL_MOVE_FAMILIES {
        let kind = family.kind();
        if kind.moves_required() > moves_remaining {
            continue;
        }
        let mut proposer = Proposer::new(kind, belief, &mut *genes, &mut *sink);
        family.propose_moves(&mut proposer);
    }
}

/// Scores candidates of one family and forwards them to a sink.
pub struct Proposer<'a> {
    kind: MoveKind,
    belief: &'a BeliefState,
    genes: &'a mut GeneStore,
    sink: &'a mut dyn ProposalSink,
    bias: Option<f64>,
}

impl fmt::Debug for Proposer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proposer")
            .field("kind", &self.kind)
            .field("bias", &self.bias)
            .finish_non_exhaustive()
    }
}

impl<'a> Proposer<'a> {
    pub fn new(
        kind: MoveKind,
        belief: &'a BeliefState,
        genes: &'a mut GeneStore,
        sink: &'a mut dyn ProposalSink,
    ) -> Self {
        Self {
            kind,
            belief,
            genes,
            sink,
            bias: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[must_use]
    pub fn belief(&self) -> &'a BeliefState {
        self.belief
    }

    /// The gene `{kind}{suffix}` of this proposer's family.
    pub fn gene(&mut self, suffix: &str) -> f64 {
        self.genes.feature(self.kind, suffix)
    }

    /// Friendly and enemy influence at `pos`, each scaled by its gene.
    pub fn influence(&mut self, pos: Position) -> f64 {
        let friendly = self.belief.influence(Allegiance::Friendly, self.kind, pos);
        let enemy = self.belief.influence(Allegiance::Enemy, self.kind, pos);
        friendly * self.gene(FRIENDLY_DISTANCE_WEIGHT) + enemy * self.gene(ENEMY_DISTANCE_WEIGHT)
    }

    /// Columns from our edge and from the opponent's edge, each scaled by its gene.
    ///
    /// Until the starting column is known the agent is assumed to start at `y = 0`.
    pub fn home_bias(&mut self, pos: Position) -> f64 {
        let home = self.belief.starting_column().unwrap_or(StartingColumn::Low);
        count(home.columns_from_home(pos)) * self.gene(Y_POSITION_FROM_MY_SIDE)
            + count(home.columns_from_enemy_home(pos)) * self.gene(Y_POSITION_FROM_ENEMY_SIDE)
    }

    #[must_use]
    pub fn friendly_distance(&self, pos: Position) -> f64 {
        f64::from(self.belief.friendly_distance(pos))
    }

    #[must_use]
    pub fn enemy_distance(&self, pos: Position) -> f64 {
        f64::from(self.belief.enemy_distance(pos))
    }

    /// Adds the template bias and noise to `feature_weight` and forwards the move.
    pub fn propose(&mut self, mv: Move, feature_weight: f64) {
        debug_assert_eq!(mv.kind(), self.kind);
        let bias = *self
            .bias
            .get_or_insert_with(|| template_bias(self.kind, self.belief, self.genes));
        let weight = feature_weight + bias + self.genes.noise(NOISE_MAX);
        self.sink.propose(mv, weight);
    }
}

#[expect(clippy::cast_precision_loss)]
fn count(n: usize) -> f64 {
    n as f64
}

/// Feature weight shared by plant and fertilise.
fn settle_weight(proposer: &mut Proposer<'_>, target: Position) -> f64 {
    proposer.gene(WEIGHT)
        + proposer.influence(target)
        + proposer.enemy_distance(target) * proposer.gene(ENEMY_DISTANCE)
        + proposer.home_bias(target)
}

#[derive(Debug, Clone, Copy)]
pub struct PlantFamily;

impl MoveFamily for PlantFamily {
    fn kind(&self) -> MoveKind {
        MoveKind::Plant
    }

    fn propose_moves(&self, proposer: &mut Proposer<'_>) {
        let belief = proposer.belief();
        for target in Position::all() {
            if !belief.is_unknown(target) {
                continue;
            }
            let borders_ours = target
                .orthogonal_neighbors()
                .iter()
                .any(|&pos| belief.friendly(pos) != 0);
            if borders_ours {
                let weight = settle_weight(proposer, target);
                proposer.propose(Move::Plant { target }, weight);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FertiliseFamily;

impl MoveFamily for FertiliseFamily {
    fn kind(&self) -> MoveKind {
        MoveKind::Fertilise
    }

    fn propose_moves(&self, proposer: &mut Proposer<'_>) {
        let belief = proposer.belief();
        for target in Position::all().filter(|&pos| belief.friendly(pos) > 0) {
            let weight = settle_weight(proposer, target);
            proposer.propose(Move::Fertilise { target }, weight);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoutFamily;

impl MoveFamily for ScoutFamily {
    fn kind(&self) -> MoveKind {
        MoveKind::Scout
    }

    fn propose_moves(&self, proposer: &mut Proposer<'_>) {
        let belief = proposer.belief();
        for center in Position::interior() {
            let mut unknown = 0;
            let mut knowledge_age = 0;
            for pos in center.neighborhood() {
                if belief.friendly(pos) != 0 {
                    continue;
                }
                if belief.enemy(pos) == 0 {
                    unknown += 1;
                } else {
                    knowledge_age += belief.knowledge_age(pos);
                }
            }
            let weight = proposer.gene(WEIGHT)
                + f64::from(unknown) * proposer.gene(UNKNOWN_SQUARE_COUNT)
                + f64::from(knowledge_age) * proposer.gene(KNOWLEDGE_AGE)
                + proposer.influence(center)
                + proposer.friendly_distance(center) * proposer.gene(FRIENDLY_DISTANCE)
                + proposer.enemy_distance(center) * proposer.gene(ENEMY_DISTANCE)
                + proposer.home_bias(center);
            proposer.propose(Move::Scout { center }, weight);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColoniseFamily;

impl MoveFamily for ColoniseFamily {
    fn kind(&self) -> MoveKind {
        MoveKind::Colonise
    }

    fn propose_moves(&self, proposer: &mut Proposer<'_>) {
        let belief = proposer.belief();
        let donors: Vec<_> = Position::all()
            .map(|pos| (pos, belief.friendly(pos)))
            .filter(|&(_, strength)| strength > 1)
            .collect();

        for target in Position::all() {
            // next to our own cells planting does the same for one move
            if !belief.is_unknown(target) || belief.friendly_distance(target) <= 1 {
                continue;
            }
            let weight = proposer.gene(WEIGHT)
                + proposer.influence(target)
                + proposer.friendly_distance(target) * proposer.gene(FRIENDLY_DISTANCE)
                + proposer.enemy_distance(target) * proposer.gene(ENEMY_DISTANCE)
                + proposer.home_bias(target);
            for &(source, strength) in &donors {
                let donor_weight = f64::from(strength) * proposer.gene(SOURCE_POINTS);
                proposer.propose(Move::Colonise { target, source }, weight + donor_weight);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SprayFamily;

impl MoveFamily for SprayFamily {
    fn kind(&self) -> MoveKind {
        MoveKind::Spray
    }

    fn propose_moves(&self, proposer: &mut Proposer<'_>) {
        let belief = proposer.belief();
        for target in Position::all() {
            let enemy_sum = belief.enemy(target)
                + target
                    .orthogonal_neighbors()
                    .iter()
                    .map(|&pos| belief.enemy(pos))
                    .sum::<i32>();
            if enemy_sum <= 0 {
                continue;
            }
            let weight = proposer.gene(WEIGHT)
                + f64::from(enemy_sum) * proposer.gene(ENEMY_SCORE_FEATURE)
                + proposer.friendly_distance(target) * proposer.gene(FRIENDLY_DISTANCE)
                + proposer.home_bias(target);
            proposer.propose(Move::Spray { target }, weight);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BombFamily;

impl MoveFamily for BombFamily {
    fn kind(&self) -> MoveKind {
        MoveKind::Bomb
    }

    fn propose_moves(&self, proposer: &mut Proposer<'_>) {
        let belief = proposer.belief();
        for target in Position::all() {
            let enemy = belief.enemy(target);
            if enemy <= 0 {
                continue;
            }
            let weight = proposer.gene(WEIGHT)
                + f64::from(enemy) * proposer.gene(ENEMY_SCORE_FEATURE)
                + f64::from(belief.knowledge_age(target)) * proposer.gene(KNOWLEDGE_AGE)
                + proposer.friendly_distance(target) * proposer.gene(FRIENDLY_DISTANCE)
                + proposer.influence(target)
                + proposer.home_bias(target);
            proposer.propose(Move::Bomb { target }, weight);
        }
    }
}
