use arrayvec::ArrayVec;

use crate::PositionError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 11;
/// Largest valid coordinate on either axis.
pub const MAX_COORD: usize = BOARD_SIZE - 1;
/// Largest Manhattan distance between two cells of the board.
pub const MAX_DISTANCE: usize = 2 * MAX_COORD;

/// A cell of the 11×11 board.
///
/// `x` is the first index of the wire board (`board[x][y]`) and `y` the second. The two
/// players start on opposite `y` edges (columns 0 and 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Creates a position from in-range coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is greater than [`MAX_COORD`].
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        assert!(x <= MAX_COORD && y <= MAX_COORD);
        Self { x, y }
    }

    /// Creates a position from untrusted (wire) coordinates.
    pub fn try_new(x: i64, y: i64) -> Result<Self, PositionError> {
        let convert = |v: i64| usize::try_from(v).ok().filter(|v| *v <= MAX_COORD);
        match (convert(x), convert(y)) {
            (Some(px), Some(py)) => Ok(Self { x: px, y: py }),
            _ => Err(PositionError { x, y }),
        }
    }

    /// Iterates over every cell, `x` outer and `y` inner.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Self { x, y }))
    }

    /// Iterates over the cells whose full 3×3 neighbourhood lies on the board.
    pub fn interior() -> impl Iterator<Item = Self> {
        (1..MAX_COORD).flat_map(|x| (1..MAX_COORD).map(move |y| Self { x, y }))
    }

    #[must_use]
    pub fn is_interior(self) -> bool {
        (1..MAX_COORD).contains(&self.x) && (1..MAX_COORD).contains(&self.y)
    }

    /// Returns the in-bounds orthogonal neighbours in the order `x-1`, `x+1`, `y-1`, `y+1`.
    #[must_use]
    pub fn orthogonal_neighbors(self) -> ArrayVec<Self, 4> {
        let Self { x, y } = self;
        let mut neighbors = ArrayVec::new();
        if x > 0 {
            neighbors.push(Self { x: x - 1, y });
        }
        if x < MAX_COORD {
            neighbors.push(Self { x: x + 1, y });
        }
        if y > 0 {
            neighbors.push(Self { x, y: y - 1 });
        }
        if y < MAX_COORD {
            neighbors.push(Self { x, y: y + 1 });
        }
        neighbors
    }

    /// Returns the in-bounds cells of the 3×3 block centred here, in row-major order
    /// (`x` outer, `y` inner), including the centre itself.
    #[must_use]
    pub fn neighborhood(self) -> ArrayVec<Self, 9> {
        let xs = self.x.saturating_sub(1)..=usize::min(self.x + 1, MAX_COORD);
        xs.flat_map(|x| {
            let ys = self.y.saturating_sub(1)..=usize::min(self.y + 1, MAX_COORD);
            ys.map(move |y| Self { x, y })
        })
        .collect()
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}
