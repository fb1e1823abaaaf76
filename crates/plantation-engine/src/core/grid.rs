use std::ops::{Index, IndexMut};

use crate::GridShapeError;

use super::position::{BOARD_SIZE, Position};

/// Dense 11×11 board-shaped storage, indexed by [`Position`].
///
/// Every board-shaped structure of the agent (strengths, knowledge dates, distances,
/// influence accumulators) is a `Grid`; there is no sparse representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: [[T; BOARD_SIZE]; BOARD_SIZE],
}

impl<T> Grid<T>
where
    T: Copy,
{
    #[must_use]
    pub fn filled(value: T) -> Self {
        Self {
            cells: [[value; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        Self {
            cells: std::array::from_fn(|x| std::array::from_fn(|y| f(Position { x, y }))),
        }
    }

    /// Iterates over every cell in [`Position::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        Position::all().map(|pos| (pos, self[pos]))
    }
}

impl<T> Default for Grid<T>
where
    T: Copy + Default,
{
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.x][pos.y]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.cells[pos.x][pos.y]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T>
where
    T: Copy + Default,
{
    type Error = GridShapeError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let bad_row = rows.iter().find(|row| row.len() != BOARD_SIZE);
        if rows.len() != BOARD_SIZE || bad_row.is_some() {
            return Err(GridShapeError {
                expected: BOARD_SIZE,
                rows: rows.len(),
                columns: bad_row.map_or(BOARD_SIZE, Vec::len),
            });
        }
        Ok(Self::from_fn(|pos| rows[pos.x][pos.y]))
    }
}
