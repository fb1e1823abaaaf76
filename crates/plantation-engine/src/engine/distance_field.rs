use std::{cell::OnceCell, collections::VecDeque};

use crate::core::{Grid, Position};

/// Distance reported for cells with no friendly source in reach.
pub const FRIENDLY_DISTANCE_CEILING: u32 = 999;
/// Distance reported for cells with no known enemy source in reach.
///
/// Lower than the largest distance on the board, so enemy distances saturate at this value.
pub const ENEMY_DISTANCE_CEILING: u32 = 15;

/// Multi-source shortest-path distances over the grid, recomputed lazily.
///
/// `distance[p]` is the number of orthogonal steps from `p` to the nearest cell with nonzero
/// strength on the source board, capped at the field's ceiling. The cached grid is dropped by
/// [`invalidate`](Self::invalidate) and rebuilt on the next read.
///
/// # Example
///
/// ```
/// use plantation_engine::{DistanceField, Grid, Position};
///
/// let mut board = Grid::filled(0);
/// board[Position::new(2, 2)] = 1;
///
/// let field = DistanceField::new(15);
/// assert!(field.is_stale());
/// assert_eq!(field.distances(&board)[Position::new(4, 5)], 5);
/// assert!(!field.is_stale());
/// ```
#[derive(Debug, Clone)]
pub struct DistanceField {
    ceiling: u32,
    cache: OnceCell<Grid<u32>>,
}

impl DistanceField {
    #[must_use]
    pub fn new(ceiling: u32) -> Self {
        Self {
            ceiling,
            cache: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.cache.get().is_none()
    }

    pub fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Returns the distance grid for `board`, computing it first if the cache is stale.
    ///
    /// The caller is responsible for invalidating the field whenever a cell of `board`
    /// crosses between zero and nonzero.
    pub fn distances(&self, board: &Grid<i32>) -> &Grid<u32> {
        self.cache
            .get_or_init(|| compute_distances(|pos| board[pos] != 0, self.ceiling))
    }
}

/// Breadth-first search from every source cell at once.
///
/// Cells farther than `ceiling` (or unreachable because there are no sources) report
/// `ceiling`.
pub fn compute_distances<F>(is_source: F, ceiling: u32) -> Grid<u32>
where
    F: Fn(Position) -> bool,
{
    let mut distances = Grid::filled(u32::MAX);
    let mut queue = VecDeque::new();
    for pos in Position::all().filter(|pos| is_source(*pos)) {
        distances[pos] = 0;
        queue.push_back(pos);
    }

    while let Some(pos) = queue.pop_front() {
        let next = distances[pos] + 1;
        for neighbor in pos.orthogonal_neighbors() {
            if distances[neighbor] == u32::MAX {
                distances[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }

    Grid::from_fn(|pos| u32::min(distances[pos], ceiling))
}
