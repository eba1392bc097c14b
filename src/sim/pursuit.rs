//! Chaser pathing heuristic
//!
//! One lattice step per call. The chaser closes the gap along one axis at a
//! time; when both offsets have equal magnitude a fixed cascade picks the
//! axis (left, then up, then right, then down).

use std::cmp::Ordering;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Grid};

/// Which axis the chaser closes first when the offsets differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisPreference {
    /// Close the larger offset first
    #[default]
    Major,
    /// Close the smaller non-zero offset first
    Minor,
}

impl AxisPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisPreference::Major => "major",
            AxisPreference::Minor => "minor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "major" => Some(AxisPreference::Major),
            "minor" => Some(AxisPreference::Minor),
            _ => None,
        }
    }
}

/// Tie-break cascade, indexed by `[sign(dx) + 1][sign(dy) + 1]`
/// where `dx`/`dy` are chaser minus target.
const TIE_BREAK: [[Option<Direction>; 3]; 3] = [
    // dx < 0
    [Some(Direction::Right), Some(Direction::Right), Some(Direction::Up)],
    // dx == 0
    [Some(Direction::Down), None, Some(Direction::Up)],
    // dx > 0
    [Some(Direction::Left), Some(Direction::Left), Some(Direction::Left)],
];

/// Look up the tie-break move for an offset sign pattern
pub fn tie_break(dx: i32, dy: i32) -> Option<Direction> {
    TIE_BREAK[(dx.signum() + 1) as usize][(dy.signum() + 1) as usize]
}

/// Result of asking the heuristic for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pursuit {
    /// Chaser and target share a cell
    Capture,
    /// Step one cell in `direction`, landing on `to` (not bounds-checked)
    Move { direction: Direction, to: IVec2 },
}

/// Pick the chaser's next unit move toward `target`
pub fn best_move(chaser: IVec2, target: IVec2, step: i32, preference: AxisPreference) -> Pursuit {
    let offset = chaser - target;
    match choose_direction(offset.x, offset.y, preference) {
        Some(direction) => Pursuit::Move {
            direction,
            to: chaser + direction.unit() * step,
        },
        None => Pursuit::Capture,
    }
}

fn choose_direction(dx: i32, dy: i32, preference: AxisPreference) -> Option<Direction> {
    if dx == 0 && dy == 0 {
        return None;
    }

    let by_magnitude = dx.abs().cmp(&dy.abs());
    // Some(true) = horizontal, Some(false) = vertical, None = tie
    let horizontal = match preference {
        AxisPreference::Major => match by_magnitude {
            Ordering::Greater => Some(true),
            Ordering::Less => Some(false),
            Ordering::Equal => None,
        },
        AxisPreference::Minor => {
            if dx == 0 {
                Some(false)
            } else if dy == 0 {
                Some(true)
            } else {
                match by_magnitude {
                    Ordering::Less => Some(true),
                    Ordering::Greater => Some(false),
                    Ordering::Equal => None,
                }
            }
        }
    };

    match horizontal {
        Some(true) => Some(if dx > 0 { Direction::Left } else { Direction::Right }),
        Some(false) => Some(if dy > 0 { Direction::Up } else { Direction::Down }),
        None => tie_break(dx, dy),
    }
}

/// Outcome of a single chaser sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Zero offset: the target is caught
    Captured,
    /// Chaser moved to the given cell
    Moved(IVec2),
    /// Destination off the board; chaser stays put
    Blocked,
}

/// Advance the chaser by at most one cell toward `target`
pub fn advance(grid: &Grid, chaser: IVec2, target: IVec2, preference: AxisPreference) -> StepOutcome {
    match best_move(chaser, target, grid.step(), preference) {
        Pursuit::Capture => StepOutcome::Captured,
        Pursuit::Move { to, .. } if grid.contains(to) => StepOutcome::Moved(to),
        Pursuit::Move { direction, to } => {
            log::trace!("Chaser blocked moving {:?} to {}", direction, to);
            StepOutcome::Blocked
        }
    }
}

/// Lattice distance in pixels
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dir_of(chaser: (i32, i32), target: (i32, i32), preference: AxisPreference) -> Option<Direction> {
        match best_move(IVec2::from(chaser), IVec2::from(target), 25, preference) {
            Pursuit::Move { direction, .. } => Some(direction),
            Pursuit::Capture => None,
        }
    }

    #[test]
    fn test_zero_offset_is_capture() {
        assert_eq!(
            best_move(IVec2::new(25, 25), IVec2::new(25, 25), 25, AxisPreference::Major),
            Pursuit::Capture
        );
    }

    #[test]
    fn test_major_axis_moves() {
        use Direction::*;
        let m = AxisPreference::Major;
        // Target far to the right, slightly below
        assert_eq!(dir_of((100, 100), (300, 125), m), Some(Right));
        // Target far above
        assert_eq!(dir_of((100, 300), (125, 100), m), Some(Up));
        // Target to the left on the same row
        assert_eq!(dir_of((300, 100), (100, 100), m), Some(Left));
        // Target directly below
        assert_eq!(dir_of((100, 100), (100, 400), m), Some(Down));
    }

    #[test]
    fn test_minor_axis_moves() {
        use Direction::*;
        let m = AxisPreference::Minor;
        // Closes the short vertical gap first
        assert_eq!(dir_of((100, 100), (300, 125), m), Some(Down));
        // Closes the short horizontal gap first
        assert_eq!(dir_of((100, 300), (125, 100), m), Some(Right));
        // One axis aligned: moves along the other
        assert_eq!(dir_of((300, 100), (100, 100), m), Some(Left));
        assert_eq!(dir_of((100, 100), (100, 400), m), Some(Down));
    }

    #[test]
    fn test_tie_break_table() {
        use Direction::*;
        // dx > 0 always wins
        assert_eq!(tie_break(25, 25), Some(Left));
        assert_eq!(tie_break(25, -25), Some(Left));
        // then dy > 0
        assert_eq!(tie_break(-25, 25), Some(Up));
        // then dx < 0
        assert_eq!(tie_break(-25, -25), Some(Right));
        // axis-aligned patterns follow the same cascade
        assert_eq!(tie_break(0, 25), Some(Up));
        assert_eq!(tie_break(0, -25), Some(Down));
        assert_eq!(tie_break(-25, 0), Some(Right));
        assert_eq!(tie_break(0, 0), None);
    }

    #[test]
    fn test_diagonal_ties_use_table_for_both_preferences() {
        for preference in [AxisPreference::Major, AxisPreference::Minor] {
            // chaser down-right of target: dx > 0
            assert_eq!(dir_of((100, 100), (50, 50), preference), Some(Direction::Left));
            // chaser up-right of target: dx > 0, dy < 0
            assert_eq!(dir_of((100, 50), (50, 100), preference), Some(Direction::Left));
            // chaser down-left of target: dx < 0, dy > 0
            assert_eq!(dir_of((50, 100), (100, 50), preference), Some(Direction::Up));
            // chaser up-left of target
            assert_eq!(dir_of((50, 50), (100, 100), preference), Some(Direction::Right));
        }
    }

    #[test]
    fn test_advance_blocked_off_board() {
        let grid = Grid::default();
        // Target off-lattice above the origin would pull the chaser off the board
        let outcome = advance(&grid, grid.origin(), IVec2::new(25, -50), AxisPreference::Major);
        assert_eq!(outcome, StepOutcome::Blocked);
        let outcome = advance(&grid, grid.origin(), IVec2::new(100, 25), AxisPreference::Major);
        assert_eq!(outcome, StepOutcome::Moved(IVec2::new(50, 25)));
        let outcome = advance(&grid, grid.origin(), grid.origin(), AxisPreference::Major);
        assert_eq!(outcome, StepOutcome::Captured);
    }

    fn cell() -> impl Strategy<Value = IVec2> {
        (1..=24i32, 1..=24i32).prop_map(|(x, y)| IVec2::new(x * 25, y * 25))
    }

    proptest! {
        #[test]
        fn prop_major_step_closes_distance(chaser in cell(), target in cell()) {
            prop_assume!(chaser != target);
            let grid = Grid::default();
            let before = manhattan(chaser, target);
            match advance(&grid, chaser, target, AxisPreference::Major) {
                StepOutcome::Moved(next) => {
                    prop_assert_eq!(manhattan(next, target), before - 25);
                    // Moved along an axis whose offset is at least as large as the other
                    let offset = (chaser - target).abs();
                    let moved = (next - chaser).abs();
                    if moved.x != 0 {
                        prop_assert!(offset.x >= offset.y);
                    } else {
                        prop_assert!(offset.y >= offset.x);
                    }
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        #[test]
        fn prop_minor_step_closes_distance(chaser in cell(), target in cell()) {
            prop_assume!(chaser != target);
            let grid = Grid::default();
            let before = manhattan(chaser, target);
            match advance(&grid, chaser, target, AxisPreference::Minor) {
                StepOutcome::Moved(next) => prop_assert_eq!(manhattan(next, target), before - 25),
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        #[test]
        fn prop_heuristic_is_deterministic(chaser in cell(), target in cell()) {
            let a = best_move(chaser, target, 25, AxisPreference::Major);
            let b = best_move(chaser, target, 25, AxisPreference::Major);
            prop_assert_eq!(a, b);
        }
    }
}
