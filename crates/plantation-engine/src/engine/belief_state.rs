use std::fmt;

use crate::core::{Grid, MAX_COORD, MAX_DISTANCE, MoveKind, Position};

use super::distance_field::{DistanceField, ENEMY_DISTANCE_CEILING, FRIENDLY_DISTANCE_CEILING};

/// Largest strength magnitude held for a cell.
///
/// Wire values beyond it are clamped on board ingest and rejected in move results, so every
/// board-wide sum stays within `i32`.
pub const MAX_STRENGTH: i32 = 1 << 16;

/// The move families that keep distance-weighted influence accumulators.
///
/// Spray scores only its immediate neighbourhood and has none.
pub const INFLUENCE_FAMILIES: [MoveKind; 5] = [
    MoveKind::Plant,
    MoveKind::Fertilise,
    MoveKind::Scout,
    MoveKind::Colonise,
    MoveKind::Bomb,
];

const fn influence_slot(kind: MoveKind) -> Option<usize> {
    match kind {
        MoveKind::Plant => Some(0),
        MoveKind::Fertilise => Some(1),
        MoveKind::Scout => Some(2),
        MoveKind::Colonise => Some(3),
        MoveKind::Bomb => Some(4),
        MoveKind::Spray => None,
    }
}

/// Which of the two boards a quantity is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allegiance {
    Friendly,
    Enemy,
}

impl Allegiance {
    pub const ALL: [Self; 2] = [Self::Friendly, Self::Enemy];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Enemy => "Enemy",
        }
    }
}

impl fmt::Display for Allegiance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The edge column (`y = 0` or `y = 10`) the agent started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartingColumn {
    Low,
    High,
}

impl StartingColumn {
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            Self::Low => 0,
            Self::High => MAX_COORD,
        }
    }

    /// Number of columns between `pos` and our starting edge.
    #[must_use]
    pub const fn columns_from_home(self, pos: Position) -> usize {
        match self {
            Self::Low => pos.y,
            Self::High => MAX_COORD - pos.y,
        }
    }

    /// Number of columns between `pos` and the opponent's starting edge.
    #[must_use]
    pub const fn columns_from_enemy_home(self, pos: Position) -> usize {
        MAX_COORD - self.columns_from_home(pos)
    }
}

/// Per-family scale factors for the influence accumulators.
///
/// An accumulator for family `m` at cell `t` equals `Σ_s scale_m^dist(s, t) × strength(s)`
/// over all source cells `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceScales {
    friendly: [f64; INFLUENCE_FAMILIES.len()],
    enemy: [f64; INFLUENCE_FAMILIES.len()],
}

impl DistanceScales {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(MoveKind, Allegiance) -> f64,
    {
        Self {
            friendly: INFLUENCE_FAMILIES.map(|kind| f(kind, Allegiance::Friendly)),
            enemy: INFLUENCE_FAMILIES.map(|kind| f(kind, Allegiance::Enemy)),
        }
    }

    #[must_use]
    pub fn uniform(friendly: f64, enemy: f64) -> Self {
        Self::from_fn(|_, allegiance| match allegiance {
            Allegiance::Friendly => friendly,
            Allegiance::Enemy => enemy,
        })
    }

    /// Returns the scale of `kind`, or `None` for a family without accumulators.
    #[must_use]
    pub fn scale(&self, kind: MoveKind, allegiance: Allegiance) -> Option<f64> {
        let slot = influence_slot(kind)?;
        Some(match allegiance {
            Allegiance::Friendly => self.friendly[slot],
            Allegiance::Enemy => self.enemy[slot],
        })
    }
}

/// One accumulator grid per influence family, plus the powers of its scale.
#[derive(Debug, Clone)]
struct InfluenceMaps {
    powers: [[f64; MAX_DISTANCE + 1]; INFLUENCE_FAMILIES.len()],
    maps: [Grid<f64>; INFLUENCE_FAMILIES.len()],
}

impl InfluenceMaps {
    fn new(scales: [f64; INFLUENCE_FAMILIES.len()]) -> Self {
        let powers = scales.map(|scale| {
            let mut powers = [1.0; MAX_DISTANCE + 1];
            for d in 1..=MAX_DISTANCE {
                powers[d] = powers[d - 1] * scale;
            }
            powers
        });
        Self {
            powers,
            maps: std::array::from_fn(|_| Grid::filled(0.0)),
        }
    }

    /// Adds the contribution of a strength change at `source` to every target cell.
    fn add_source(&mut self, source: Position, delta: f64) {
        for target in Position::all() {
            let dist = source.manhattan_distance(target);
            for (map, powers) in self.maps.iter_mut().zip(&self.powers) {
                map[target] += powers[dist] * delta;
            }
        }
    }

    fn get(&self, kind: MoveKind, pos: Position) -> f64 {
        influence_slot(kind).map_or(0.0, |slot| self.maps[slot][pos])
    }
}

/// The agent's model of the board.
///
/// Holds friendly strengths (authoritative, from the observed board), signed enemy estimates
/// (learned from move results; 0 means unknown or empty), the turn each cell was last
/// observed, and aggregates derived from them:
///
/// - `friendly_score == Σ friendly` and `enemy_score == Σ |enemy|`
/// - one friendly and one enemy influence accumulator per family in [`INFLUENCE_FAMILIES`]
/// - friendly and enemy [`DistanceField`]s, invalidated whenever a cell crosses zero
///
/// All aggregates are updated by delta inside [`set_friendly`](Self::set_friendly) and
/// [`set_enemy`](Self::set_enemy).
#[derive(Debug, Clone)]
pub struct BeliefState {
    turn: u32,
    friendly: Grid<i32>,
    enemy: Grid<i32>,
    knowledge_date: Grid<u32>,
    friendly_score: i32,
    enemy_score: i32,
    friendly_influence: InfluenceMaps,
    enemy_influence: InfluenceMaps,
    friendly_distances: DistanceField,
    enemy_distances: DistanceField,
    starting_column: Option<StartingColumn>,
}

impl BeliefState {
    #[must_use]
    pub fn new(scales: &DistanceScales) -> Self {
        Self {
            turn: 0,
            friendly: Grid::filled(0),
            enemy: Grid::filled(0),
            knowledge_date: Grid::filled(0),
            friendly_score: 0,
            enemy_score: 0,
            friendly_influence: InfluenceMaps::new(scales.friendly),
            enemy_influence: InfluenceMaps::new(scales.enemy),
            friendly_distances: DistanceField::new(FRIENDLY_DISTANCE_CEILING),
            enemy_distances: DistanceField::new(ENEMY_DISTANCE_CEILING),
            starting_column: None,
        }
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    #[must_use]
    pub fn friendly(&self, pos: Position) -> i32 {
        self.friendly[pos]
    }

    #[must_use]
    pub fn enemy(&self, pos: Position) -> i32 {
        self.enemy[pos]
    }

    #[must_use]
    pub fn friendly_board(&self) -> &Grid<i32> {
        &self.friendly
    }

    #[must_use]
    pub fn enemy_board(&self) -> &Grid<i32> {
        &self.enemy
    }

    /// Nothing known about the cell: neither ours nor a known enemy square.
    #[must_use]
    pub fn is_unknown(&self, pos: Position) -> bool {
        self.friendly[pos] == 0 && self.enemy[pos] == 0
    }

    #[must_use]
    pub fn knowledge_date(&self, pos: Position) -> u32 {
        self.knowledge_date[pos]
    }

    /// Turns elapsed since the cell was last observed.
    #[must_use]
    pub fn knowledge_age(&self, pos: Position) -> u32 {
        self.turn.saturating_sub(self.knowledge_date[pos])
    }

    #[must_use]
    pub fn friendly_score(&self) -> i32 {
        self.friendly_score
    }

    #[must_use]
    pub fn enemy_score(&self) -> i32 {
        self.enemy_score
    }

    /// Distance-weighted influence of one board at `pos`, as seen by family `kind`.
    ///
    /// Always 0 for spray, which keeps no accumulators.
    #[must_use]
    pub fn influence(&self, allegiance: Allegiance, kind: MoveKind, pos: Position) -> f64 {
        match allegiance {
            Allegiance::Friendly => self.friendly_influence.get(kind, pos),
            Allegiance::Enemy => self.enemy_influence.get(kind, pos),
        }
    }

    #[must_use]
    pub fn friendly_distance(&self, pos: Position) -> u32 {
        self.friendly_distances.distances(&self.friendly)[pos]
    }

    #[must_use]
    pub fn enemy_distance(&self, pos: Position) -> u32 {
        self.enemy_distances.distances(&self.enemy)[pos]
    }

    #[must_use]
    pub fn is_distance_stale(&self, allegiance: Allegiance) -> bool {
        match allegiance {
            Allegiance::Friendly => self.friendly_distances.is_stale(),
            Allegiance::Enemy => self.enemy_distances.is_stale(),
        }
    }

    /// The edge we started from, once it has been seen on an observed board.
    #[must_use]
    pub fn starting_column(&self) -> Option<StartingColumn> {
        self.starting_column
    }

    /// Sets our strength at `pos`, updating every aggregate by delta.
    ///
    /// A cell that becomes ours clears any enemy estimate there and counts as observed this
    /// turn.
    pub fn set_friendly(&mut self, pos: Position, strength: i32) {
        let old = self.friendly[pos];
        if old == strength {
            return;
        }
        if (old == 0) != (strength == 0) {
            self.friendly_distances.invalidate();
        }
        let delta = strength - old;
        self.friendly_influence.add_source(pos, f64::from(delta));
        self.friendly_score += delta;
        self.friendly[pos] = strength;

        if strength > 0 {
            self.set_enemy(pos, 0, true);
            self.knowledge_date[pos] = self.turn;
        }
    }

    /// Sets the enemy estimate at `pos`, updating every aggregate by delta.
    ///
    /// With `refresh_knowledge` the cell counts as observed this turn even when the value is
    /// unchanged; damage we inflicted without seeing the result passes `false`.
    pub fn set_enemy(&mut self, pos: Position, strength: i32, refresh_knowledge: bool) {
        let old = self.enemy[pos];
        if old != strength {
            if (old == 0) != (strength == 0) {
                self.enemy_distances.invalidate();
            }
            let delta = strength - old;
            self.enemy_influence.add_source(pos, f64::from(delta));
            self.enemy_score += strength.abs() - old.abs();
            self.enemy[pos] = strength;
        }
        if refresh_knowledge {
            self.knowledge_date[pos] = self.turn;
        }
    }

    /// Folds this turn's observed board into the belief state.
    ///
    /// Only the magnitude of each cell is used; it is our strength there, clamped to
    /// [`MAX_STRENGTH`].
    pub fn apply_observed_board(&mut self, board: &Grid<i32>, turn: u32) {
        self.turn = turn;
        for (pos, raw) in board.iter() {
            let strength = raw.saturating_abs().min(MAX_STRENGTH);
            if self.friendly[pos] != strength {
                self.set_friendly(pos, strength);
            }
        }
        if self.starting_column.is_none() {
            self.starting_column = self.infer_starting_column();
        }
    }

    fn infer_starting_column(&self) -> Option<StartingColumn> {
        (0..=MAX_COORD).find_map(|x| {
            if self.friendly[Position::new(x, 0)] > 0 {
                Some(StartingColumn::Low)
            } else if self.friendly[Position::new(x, MAX_COORD)] > 0 {
                Some(StartingColumn::High)
            } else {
                None
            }
        })
    }
}
