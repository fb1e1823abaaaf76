use std::iter;

use arrayvec::ArrayVec;

use crate::core::{MoveKind, Position};

use super::belief_state::{BeliefState, MAX_STRENGTH};

/// Enemy levels a bomb removes from its target.
pub const BOMB_DAMAGE: i32 = 4;
/// Enemy levels a spray removes from each cell it covers.
pub const SPRAY_DAMAGE: i32 = 1;

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum MoveResultError {
    /// The game reported our move as illegal. We have no recovery strategy for a move we
    /// believed legal, so this ends the game.
    #[display("{kind} move was rejected by the game")]
    Rejected { kind: MoveKind },
    #[display("cannot decode {kind} result {result:?}")]
    Malformed { kind: MoveKind, result: String },
}

/// The decoded result string of one of our moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move went through and revealed nothing (`"OK"`).
    Done,
    /// Plant or colonise hit a square the opponent holds (`"occupied <n>"`).
    Occupied { strength: i32 },
    /// Scout values for the in-bounds cells of the 3×3 block, row-major (`"OK v0,...,v8"`).
    Revealed { values: ArrayVec<i32, 9> },
    /// Spray hit count or bomb levels removed (`"OK <n>"`).
    Reduced { levels: i32 },
}

impl MoveOutcome {
    /// Decodes the raw result of a `kind` move.
    pub fn parse(kind: MoveKind, result: &str) -> Result<Self, MoveResultError> {
        let result = result.trim();
        let malformed = || MoveResultError::Malformed {
            kind,
            result: result.to_owned(),
        };
        if result == "error" {
            return Err(MoveResultError::Rejected { kind });
        }
        // "OK " prefix in front of any payload
        let payload = || result.get(3..).map(str::trim).ok_or_else(malformed);
        let number = |text: &str| {
            text.trim()
                .parse::<i32>()
                .ok()
                .filter(|value| value.unsigned_abs() <= MAX_STRENGTH.unsigned_abs())
                .ok_or_else(malformed)
        };

        match kind {
            MoveKind::Plant | MoveKind::Colonise => match result.strip_prefix("occupied ") {
                Some(strength) => {
                    let strength = number(strength)?;
                    Ok(Self::Occupied { strength })
                }
                None => Ok(Self::Done),
            },
            MoveKind::Fertilise => Ok(Self::Done),
            MoveKind::Scout => {
                let mut values = ArrayVec::new();
                for value in payload()?.split(',') {
                    values.try_push(number(value)?).map_err(|_| malformed())?;
                }
                Ok(Self::Revealed { values })
            }
            MoveKind::Spray | MoveKind::Bomb => {
                let levels = number(payload()?)?;
                Ok(Self::Reduced { levels })
            }
        }
    }
}

impl BeliefState {
    /// Folds the reported result of our `kind` move at `target` into the belief state.
    ///
    /// `sign` is our side's sign on the true board; scout values are multiplied by it so
    /// that enemy squares come out non-positive.
    ///
    /// | move | effect |
    /// |---|---|
    /// | plant, colonise | an occupied target records `-|n|` as the enemy estimate |
    /// | fertilise | none, the next board snapshot shows the result |
    /// | scout | each non-positive adjusted value is recorded as the enemy estimate |
    /// | spray | target and its orthogonal neighbours lose [`SPRAY_DAMAGE`], not re-observed |
    /// | bomb | target loses [`BOMB_DAMAGE`], re-observed only if fewer levels were removed |
    ///
    /// Estimates reduced by spray or bomb never drop below 0.
    pub fn apply_move_result(
        &mut self,
        kind: MoveKind,
        turn: u32,
        target: Position,
        result: &str,
        sign: i32,
    ) -> Result<MoveOutcome, MoveResultError> {
        let outcome = MoveOutcome::parse(kind, result)?;
        self.set_turn(turn);

        match (kind, &outcome) {
            (MoveKind::Plant | MoveKind::Colonise, MoveOutcome::Occupied { strength }) => {
                self.set_enemy(target, -strength.abs(), true);
            }
            (MoveKind::Scout, MoveOutcome::Revealed { values }) => {
                let cells = target.neighborhood();
                if cells.len() != values.len() {
                    return Err(MoveResultError::Malformed {
                        kind,
                        result: result.to_owned(),
                    });
                }
                for (cell, value) in iter::zip(cells, values) {
                    let value = value * sign;
                    // positive cells are ours; the next board snapshot covers them
                    if value <= 0 {
                        self.set_enemy(cell, value, true);
                    }
                }
            }
            (MoveKind::Spray, _) => {
                for cell in iter::once(target).chain(target.orthogonal_neighbors()) {
                    let reduced = i32::max(0, self.enemy(cell) - SPRAY_DAMAGE);
                    self.set_enemy(cell, reduced, false);
                }
            }
            (MoveKind::Bomb, MoveOutcome::Reduced { levels }) => {
                let reduced = i32::max(0, self.enemy(target) - BOMB_DAMAGE);
                self.set_enemy(target, reduced, *levels < BOMB_DAMAGE);
            }
            _ => {}
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DistanceScales;

    fn belief() -> BeliefState {
        BeliefState::new(&DistanceScales::uniform(0.5, 0.5))
    }

    #[test]
    fn test_error_result_is_rejected() {
        for kind in MoveKind::ALL {
            let err = MoveOutcome::parse(kind, "error").unwrap_err();
            assert!(err.is_rejected());
        }
    }

    #[test]
    fn test_parse_outcomes() {
        assert_eq!(MoveOutcome::parse(MoveKind::Plant, "OK"), Ok(MoveOutcome::Done));
        assert_eq!(
            MoveOutcome::parse(MoveKind::Colonise, "occupied -3"),
            Ok(MoveOutcome::Occupied { strength: -3 })
        );
        assert_eq!(
            MoveOutcome::parse(MoveKind::Bomb, "OK 2"),
            Ok(MoveOutcome::Reduced { levels: 2 })
        );
        assert!(
            MoveOutcome::parse(MoveKind::Bomb, "OK lots")
                .unwrap_err()
                .is_malformed()
        );
        assert!(
            MoveOutcome::parse(MoveKind::Scout, "OK 1,2,3,4,5,6,7,8,9,10")
                .unwrap_err()
                .is_malformed()
        );
    }

    #[test]
    fn test_out_of_range_values_are_malformed() {
        let results = [
            (MoveKind::Plant, format!("occupied {}", i32::MIN)),
            (MoveKind::Colonise, format!("occupied {}", MAX_STRENGTH + 1)),
            (MoveKind::Scout, format!("OK 0,0,0,0,{},0,0,0,0", i32::MIN)),
            (MoveKind::Bomb, format!("OK {}", i32::MAX)),
            (MoveKind::Plant, "occupied 99999999999".to_owned()),
        ];
        for (kind, result) in results {
            let err = MoveOutcome::parse(kind, &result).unwrap_err();
            assert!(err.is_malformed(), "{result}");
        }

        let mut belief = belief();
        let err = belief
            .apply_move_result(MoveKind::Plant, 1, Position::new(4, 4), "occupied -2147483648", 1)
            .unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(belief.enemy(Position::new(4, 4)), 0);
        assert_eq!(
            MoveOutcome::parse(MoveKind::Plant, &format!("occupied -{MAX_STRENGTH}")),
            Ok(MoveOutcome::Occupied {
                strength: -MAX_STRENGTH
            })
        );
    }

    #[test]
    fn test_occupied_plant_records_negative_strength() {
        let mut belief = belief();
        let target = Position::new(4, 4);
        belief
            .apply_move_result(MoveKind::Plant, 3, target, "occupied 2", 1)
            .unwrap();
        assert_eq!(belief.enemy(target), -2);
        assert_eq!(belief.knowledge_date(target), 3);

        belief
            .apply_move_result(MoveKind::Colonise, 4, target, "occupied -5", -1)
            .unwrap();
        assert_eq!(belief.enemy(target), -5);
    }

    #[test]
    fn test_fertilise_changes_nothing() {
        let mut belief = belief();
        belief
            .apply_move_result(MoveKind::Fertilise, 2, Position::new(1, 1), "OK", 1)
            .unwrap();
        assert_eq!(belief.enemy_score(), 0);
        assert_eq!(belief.knowledge_date(Position::new(1, 1)), 0);
    }

    #[test]
    fn test_scout_decodes_with_sign() {
        let mut belief = belief();
        let center = Position::new(5, 5);
        let result = "OK 3,0,-2,1,0,0,-4,2,0";
        let outcome = belief
            .apply_move_result(MoveKind::Scout, 5, center, result, -1)
            .unwrap();
        let MoveOutcome::Revealed { values } = outcome else {
            panic!("expected scout values, got {outcome:?}");
        };
        assert_eq!(values.len(), 9);

        for (cell, raw) in iter::zip(center.neighborhood(), values) {
            let adjusted = -raw;
            if adjusted <= 0 {
                assert_eq!(belief.enemy(cell), adjusted, "cell {cell}");
                assert_eq!(belief.knowledge_date(cell), 5, "cell {cell}");
            } else {
                assert_eq!(belief.enemy(cell), 0, "cell {cell}");
                assert_eq!(belief.knowledge_date(cell), 0, "cell {cell}");
            }
        }
        // 3 and 1 and 2 become enemy squares, -2 and -4 are ours
        assert_eq!(belief.enemy_score(), 6);
    }

    #[test]
    fn test_scout_value_count_must_match_block() {
        let mut belief = belief();
        let err = belief
            .apply_move_result(MoveKind::Scout, 1, Position::new(5, 5), "OK 1,2,3", 1)
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_spray_reduces_cross_without_refresh() {
        let mut belief = belief();
        let target = Position::new(0, 5);
        belief.set_turn(1);
        belief.set_enemy(target, 3, true);
        belief.set_enemy(Position::new(1, 5), 1, true);
        belief.set_enemy(Position::new(0, 4), -2, true);

        belief
            .apply_move_result(MoveKind::Spray, 7, target, "OK 3", 1)
            .unwrap();
        assert_eq!(belief.enemy(target), 2);
        assert_eq!(belief.enemy(Position::new(1, 5)), 0);
        assert_eq!(belief.enemy(Position::new(0, 4)), 0);
        assert_eq!(belief.knowledge_date(target), 1);
        assert_eq!(belief.enemy_score(), 2);
    }

    #[test]
    fn test_bomb_refreshes_only_on_partial_reduction() {
        let mut belief = belief();
        let target = Position::new(8, 8);
        belief.set_turn(1);
        belief.set_enemy(target, 6, true);

        belief
            .apply_move_result(MoveKind::Bomb, 4, target, "OK 4", 1)
            .unwrap();
        assert_eq!(belief.enemy(target), 2);
        assert_eq!(belief.knowledge_date(target), 1);

        belief
            .apply_move_result(MoveKind::Bomb, 6, target, "OK 2", 1)
            .unwrap();
        assert_eq!(belief.enemy(target), 0);
        assert_eq!(belief.knowledge_date(target), 6);
    }
}
