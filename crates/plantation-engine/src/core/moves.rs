use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize, Serializer};

use super::position::Position;

/// One of the six move families of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Plant,
    Fertilise,
    Scout,
    Colonise,
    Spray,
    Bomb,
}

/// Number of move families.
pub const MOVE_KIND_COUNT: usize = 6;

impl MoveKind {
    /// All families, in the order the agent generates proposals for them.
    pub const ALL: [Self; MOVE_KIND_COUNT] = [
        Self::Plant,
        Self::Fertilise,
        Self::Scout,
        Self::Colonise,
        Self::Spray,
        Self::Bomb,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plant => "plant",
            Self::Fertilise => "fertilise",
            Self::Scout => "scout",
            Self::Colonise => "colonise",
            Self::Spray => "spray",
            Self::Bomb => "bomb",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of the turn's moves this family consumes.
    #[must_use]
    pub const fn moves_required(self) -> u32 {
        match self {
            Self::Plant | Self::Fertilise | Self::Scout => 1,
            Self::Colonise | Self::Spray | Self::Bomb => 2,
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown move family {name:?}")]
pub struct ParseMoveKindError {
    pub name: String,
}

impl FromStr for MoveKind {
    type Err = ParseMoveKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseMoveKindError { name: s.to_owned() })
    }
}

/// A concrete move, one payload shape per family.
///
/// On the wire a move is the pair `[family, params]`, where `params` is `[x, y]` for every
/// family except colonise, which sends `[x, y, source_x, source_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Plant { target: Position },
    Fertilise { target: Position },
    Scout { center: Position },
    Colonise { target: Position, source: Position },
    Spray { target: Position },
    Bomb { target: Position },
}

impl Move {
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            Self::Plant { .. } => MoveKind::Plant,
            Self::Fertilise { .. } => MoveKind::Fertilise,
            Self::Scout { .. } => MoveKind::Scout,
            Self::Colonise { .. } => MoveKind::Colonise,
            Self::Spray { .. } => MoveKind::Spray,
            Self::Bomb { .. } => MoveKind::Bomb,
        }
    }

    /// The cell the move acts on (the centre of the block for scout).
    #[must_use]
    pub fn target(&self) -> Position {
        match *self {
            Self::Plant { target }
            | Self::Fertilise { target }
            | Self::Colonise { target, .. }
            | Self::Spray { target }
            | Self::Bomb { target } => target,
            Self::Scout { center } => center,
        }
    }

    #[must_use]
    pub fn params(&self) -> ArrayVec<usize, 4> {
        let target = self.target();
        let mut params = ArrayVec::from_iter([target.x, target.y]);
        if let Self::Colonise { source, .. } = self {
            params.push(source.x);
            params.push(source.y);
        }
        params
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colonise { target, source } => write!(f, "colonise {target} from {source}"),
            _ => write!(f, "{} {}", self.kind(), self.target()),
        }
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.kind(), self.params().as_slice()).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_kind_round_trips_through_str() {
        for kind in MoveKind::ALL {
            assert_eq!(kind.as_str().parse::<MoveKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert!("harvest".parse::<MoveKind>().is_err());
    }

    #[test]
    fn test_move_kind_index_matches_all_order() {
        for (i, kind) in MoveKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_two_move_families() {
        let expensive: Vec<_> = MoveKind::ALL
            .into_iter()
            .filter(|kind| kind.moves_required() > 1)
            .collect();
        assert_eq!(
            expensive,
            [MoveKind::Colonise, MoveKind::Spray, MoveKind::Bomb]
        );
    }

    #[test]
    fn test_move_serializes_as_wire_pair() {
        let plant = Move::Plant {
            target: Position::new(4, 0),
        };
        assert_eq!(serde_json::to_string(&plant).unwrap(), r#"["plant",[4,0]]"#);

        let colonise = Move::Colonise {
            target: Position::new(3, 3),
            source: Position::new(5, 0),
        };
        assert_eq!(
            serde_json::to_string(&colonise).unwrap(),
            r#"["colonise",[3,3,5,0]]"#
        );
    }

    #[test]
    fn test_move_kind_deserializes_lowercase() {
        let kind: MoveKind = serde_json::from_str(r#""fertilise""#).unwrap();
        assert_eq!(kind, MoveKind::Fertilise);
    }
}
