//! Terms shared by every proposal, and the gene-name suffixes of the per-family features.

use plantation_engine::{BeliefState, MoveKind};

use crate::genes::GeneStore;

/// Largest magnitude of the noise added to every proposal.
pub const NOISE_MAX: f64 = 2.0;
/// Turn count the `TurnsLeft` term counts down from.
pub const TURN_HORIZON: f64 = 100.0;
/// Stand-in for `enemy / friendly` while we own nothing.
pub const SCORE_RATIO_SENTINEL: f64 = 99_999.0;

pub const TURNS_PLAYED: &str = "TurnsPlayed";
pub const TURNS_LEFT: &str = "TurnsLeft";
pub const FRIENDLY_SCORE: &str = "FriendlyScore";
pub const ENEMY_SCORE: &str = "EnemyScore";
pub const SCORE_RATIO: &str = "ScoreRatio";

pub const WEIGHT: &str = "Weight";
pub const FRIENDLY_DISTANCE_WEIGHT: &str = "FriendlyDistanceWeight";
pub const ENEMY_DISTANCE_WEIGHT: &str = "EnemyDistanceWeight";
pub const FRIENDLY_DISTANCE: &str = "FriendlyDistance";
pub const ENEMY_DISTANCE: &str = "EnemyDistance";
pub const Y_POSITION_FROM_MY_SIDE: &str = "YPositionFromMySide";
pub const Y_POSITION_FROM_ENEMY_SIDE: &str = "YPositionFromEnemySide";
pub const UNKNOWN_SQUARE_COUNT: &str = "UnknownSquareCount";
pub const KNOWLEDGE_AGE: &str = "KnowledgeAge";
pub const SOURCE_POINTS: &str = "SourcePoints";
/// Local enemy sum for spray, enemy estimate at the target for bomb.
///
/// Resolves to the same gene as the template's [`ENEMY_SCORE`] term.
pub const ENEMY_SCORE_FEATURE: &str = ENEMY_SCORE;

/// `enemy_score / friendly_score`, or [`SCORE_RATIO_SENTINEL`] while we own nothing.
#[must_use]
pub fn score_ratio(friendly_score: i32, enemy_score: i32) -> f64 {
    if friendly_score > 0 {
        f64::from(enemy_score) / f64::from(friendly_score)
    } else {
        SCORE_RATIO_SENTINEL
    }
}

/// The game-progress part of a `kind` proposal's weight, identical for every candidate of
/// that family within one turn.
///
/// ```text
/// turn × TurnsPlayed + (100 − turn) × TurnsLeft
///   + friendly × FriendlyScore + enemy × EnemyScore + ratio × ScoreRatio
/// ```
pub fn template_bias(kind: MoveKind, belief: &BeliefState, genes: &mut GeneStore) -> f64 {
    let turn = f64::from(belief.turn());
    let friendly = belief.friendly_score();
    let enemy = belief.enemy_score();
    turn * genes.feature(kind, TURNS_PLAYED)
        + (TURN_HORIZON - turn) * genes.feature(kind, TURNS_LEFT)
        + f64::from(friendly) * genes.feature(kind, FRIENDLY_SCORE)
        + f64::from(enemy) * genes.feature(kind, ENEMY_SCORE)
        + score_ratio(friendly, enemy) * genes.feature(kind, SCORE_RATIO)
}
