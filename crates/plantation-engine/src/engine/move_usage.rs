use std::fmt;

use crate::core::{MOVE_KIND_COUNT, MoveKind};

/// Number of times each move family was chosen during one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveUsage {
    counts: [u32; MOVE_KIND_COUNT],
}

impl MoveUsage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: MoveKind) {
        self.counts[kind.index()] += 1;
    }

    #[must_use]
    pub fn count(&self, kind: MoveKind) -> u32 {
        self.counts[kind.index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MoveKind, u32)> + '_ {
        MoveKind::ALL.into_iter().map(|kind| (kind, self.count(kind)))
    }
}

impl fmt::Display for MoveUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{kind}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_display() {
        let mut usage = MoveUsage::new();
        usage.record(MoveKind::Plant);
        usage.record(MoveKind::Plant);
        usage.record(MoveKind::Bomb);
        assert_eq!(usage.count(MoveKind::Plant), 2);
        assert_eq!(usage.count(MoveKind::Scout), 0);
        assert_eq!(usage.total(), 3);
        assert_eq!(
            usage.to_string(),
            "plant: 2; fertilise: 0; scout: 0; colonise: 0; spray: 0; bomb: 1"
        );
    }
}
