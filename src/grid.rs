//! Lattice geometry
//!
//! The board is a square of `board_size` pixels. Playable cells are the
//! lattice intersections at multiples of `step`, keeping one step of margin
//! on every side: `[step, board_size - step]` on both axes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_SIZE, GRID_STEP};
use crate::error::GridError;

/// A unit move on the lattice (screen coordinates, +y points down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit offset in lattice steps
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }
}

/// Board geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    step: i32,
    board_size: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            step: GRID_STEP,
            board_size: BOARD_SIZE,
        }
    }
}

impl Grid {
    pub fn new(step: i32, board_size: i32) -> Result<Self, GridError> {
        if step <= 0 {
            return Err(GridError::NonPositiveStep(step));
        }
        if board_size % step != 0 {
            return Err(GridError::Misaligned { board_size, step });
        }
        // Need at least one intersection between the margins
        if board_size < 2 * step {
            return Err(GridError::TooSmall { board_size, step });
        }
        Ok(Self { step, board_size })
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn board_size(&self) -> i32 {
        self.board_size
    }

    /// Smallest legal coordinate on either axis
    pub fn min_coord(&self) -> i32 {
        self.step
    }

    /// Largest legal coordinate on either axis
    pub fn max_coord(&self) -> i32 {
        self.board_size - self.step
    }

    /// Top-left cell; both actors restart here
    pub fn origin(&self) -> IVec2 {
        IVec2::splat(self.step)
    }

    pub fn cells_per_axis(&self) -> usize {
        ((self.max_coord() - self.min_coord()) / self.step + 1) as usize
    }

    /// Total number of claimable cells (576 on the default board)
    pub fn cell_count(&self) -> usize {
        self.cells_per_axis() * self.cells_per_axis()
    }

    /// True if `pos` is a lattice intersection inside the margins
    pub fn contains(&self, pos: IVec2) -> bool {
        let lo = self.min_coord();
        let hi = self.max_coord();
        pos.x % self.step == 0
            && pos.y % self.step == 0
            && (lo..=hi).contains(&pos.x)
            && (lo..=hi).contains(&pos.y)
    }

    /// Bounds test for raw (unsnapped) board-local coordinates
    pub fn in_bounds(&self, x: f32, y: f32) -> bool {
        let lo = self.min_coord() as f32;
        let hi = self.max_coord() as f32;
        (lo..=hi).contains(&x) && (lo..=hi).contains(&y)
    }

    /// Nearest lattice intersection, halves rounding up. No bounds check.
    pub fn snap(&self, x: f32, y: f32) -> IVec2 {
        IVec2::new(self.snap_axis(x), self.snap_axis(y))
    }

    fn snap_axis(&self, v: f32) -> i32 {
        let step = self.step as f32;
        (v / step + 0.5).floor() as i32 * self.step
    }

    /// The cell one step from `pos` in `dir`, or `None` if it leaves the board
    pub fn neighbor(&self, pos: IVec2, dir: Direction) -> Option<IVec2> {
        let next = pos + dir.unit() * self.step;
        self.contains(next).then_some(next)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        let coords = move || (self.min_coord()..=self.max_coord()).step_by(self.step as usize);
        coords().flat_map(move |y| coords().map(move |x| IVec2::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_dimensions() {
        let grid = Grid::default();
        assert_eq!(grid.cells_per_axis(), 24);
        assert_eq!(grid.cell_count(), 576);
        assert_eq!(grid.origin(), IVec2::new(25, 25));
        assert_eq!(grid.max_coord(), 600);
        assert_eq!(grid.cells().count(), 576);
    }

    #[test]
    fn test_new_rejects_bad_geometry() {
        assert_eq!(Grid::new(0, 625), Err(GridError::NonPositiveStep(0)));
        assert_eq!(
            Grid::new(25, 630),
            Err(GridError::Misaligned { board_size: 630, step: 25 })
        );
        assert_eq!(
            Grid::new(25, 25),
            Err(GridError::TooSmall { board_size: 25, step: 25 })
        );
        // Single-cell board
        let tiny = Grid::new(25, 50).unwrap();
        assert_eq!(tiny.cell_count(), 1);
    }

    #[test]
    fn test_contains() {
        let grid = Grid::default();
        assert!(grid.contains(IVec2::new(25, 25)));
        assert!(grid.contains(IVec2::new(600, 600)));
        assert!(!grid.contains(IVec2::new(0, 25)));
        assert!(!grid.contains(IVec2::new(625, 25)));
        assert!(!grid.contains(IVec2::new(30, 25)));
    }

    #[test]
    fn test_snap_rounding() {
        let grid = Grid::default();
        assert_eq!(grid.snap(37.0, 13.0), IVec2::new(25, 25));
        assert_eq!(grid.snap(37.4, 62.5), IVec2::new(25, 75));
        assert_eq!(grid.snap(38.0, 50.0), IVec2::new(50, 50));
        assert_eq!(grid.snap(599.9, 600.0), IVec2::new(600, 600));
    }

    #[test]
    fn test_in_bounds_is_inclusive() {
        let grid = Grid::default();
        assert!(grid.in_bounds(25.0, 600.0));
        assert!(!grid.in_bounds(24.9, 100.0));
        assert!(!grid.in_bounds(100.0, 600.1));
        assert!(!grid.in_bounds(37.0, 13.0));
    }

    #[test]
    fn test_neighbor_respects_edges() {
        let grid = Grid::default();
        let origin = grid.origin();
        assert_eq!(grid.neighbor(origin, Direction::Up), None);
        assert_eq!(grid.neighbor(origin, Direction::Left), None);
        assert_eq!(grid.neighbor(origin, Direction::Right), Some(IVec2::new(50, 25)));
        assert_eq!(grid.neighbor(origin, Direction::Down), Some(IVec2::new(25, 50)));
    }
}
