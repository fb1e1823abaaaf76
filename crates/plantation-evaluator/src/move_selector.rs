use plantation_engine::Move;

/// Receives every weighted candidate move of a turn.
pub trait ProposalSink {
    fn propose(&mut self, mv: Move, weight: f64);
}

/// Keeps the running best proposal of a turn.
///
/// A proposal replaces the incumbent when the incumbent's weight is exactly 0 or strictly
/// lower. Equal nonzero weights therefore keep the earlier proposal, while an incumbent of
/// weight 0 gives way to the next proposal whatever its weight.
#[derive(Debug, Clone, Default)]
pub struct MoveSelector {
    best: Option<(Move, f64)>,
}

impl MoveSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn best(&self) -> Option<(Move, f64)> {
        self.best
    }

    #[must_use]
    pub fn into_best_move(self) -> Option<Move> {
        self.best.map(|(mv, _)| mv)
    }
}

impl ProposalSink for MoveSelector {
    fn propose(&mut self, mv: Move, weight: f64) {
        let replace = match self.best {
            None => true,
            Some((_, best_weight)) => best_weight == 0.0 || best_weight < weight,
        };
        if replace {
            self.best = Some((mv, weight));
        }
    }
}

/// Collects every proposal, in order.
impl ProposalSink for Vec<(Move, f64)> {
    fn propose(&mut self, mv: Move, weight: f64) {
        self.push((mv, weight));
    }
}
