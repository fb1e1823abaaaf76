use plantation_engine::{MoveKind, MoveUsage};

/// Final scores of a game as reported to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub your_score: i64,
    pub opponent_score: i64,
}

impl GameOutcome {
    /// `|your_score| − |opponent_score|`.
    #[must_use]
    pub fn score_diff(&self) -> i64 {
        self.your_score.abs() - self.opponent_score.abs()
    }
}

/// Penalty for each family used fewer than `target` times: `penalty × (target − uses)`.
#[must_use]
pub fn usage_penalty(usage: &MoveUsage, target: u32, penalty: i64) -> i64 {
    MoveKind::ALL
        .into_iter()
        .map(|kind| penalty * i64::from(target.saturating_sub(usage.count(kind))))
        .sum()
}

/// Fitness earned by one game: the score difference minus the usage penalty.
#[must_use]
pub fn game_fitness(outcome: &GameOutcome, usage: &MoveUsage, target: u32, penalty: i64) -> i64 {
    outcome.score_diff() - usage_penalty(usage, target, penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_diff_uses_magnitudes() {
        let outcome = GameOutcome {
            your_score: -30,
            opponent_score: 12,
        };
        assert_eq!(outcome.score_diff(), 18);
    }

    #[test]
    fn test_unused_families_are_penalised() {
        let mut usage = MoveUsage::new();
        for _ in 0..7 {
            usage.record(MoveKind::Plant);
        }
        for _ in 0..3 {
            usage.record(MoveKind::Scout);
        }
        // fertilise, colonise, spray, bomb: 4 × 5 × 10; scout: 2 × 10
        assert_eq!(usage_penalty(&usage, 5, 10), 220);

        let outcome = GameOutcome {
            your_score: 40,
            opponent_score: 25,
        };
        assert_eq!(game_fitness(&outcome, &usage, 5, 10), 15 - 220);
    }

    #[test]
    fn test_balanced_usage_has_no_penalty() {
        let mut usage = MoveUsage::new();
        for kind in MoveKind::ALL {
            for _ in 0..5 {
                usage.record(kind);
            }
        }
        assert_eq!(usage_penalty(&usage, 5, 10), 0);
    }
}
