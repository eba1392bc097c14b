//! Scripted player for the headless demo
//!
//! Produces pointer positions the way a jittery hand would: each call picks
//! a neighbouring cell that keeps away from the chaser and prefers
//! unclaimed cells, then wobbles inside that cell. Seeded, so a demo run is
//! reproducible.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::grid::{Direction, Grid};
use crate::sim::GameState;
use crate::sim::pursuit::manhattan;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Next pointer position (board-local pixels)
    pub fn next_pointer(&mut self, state: &GameState) -> (f32, f32) {
        let grid = &state.grid;
        let Some(here) = state.evader else {
            // Open as far from the chaser as the board allows
            return self.wobble(grid, IVec2::splat(grid.max_coord()));
        };

        let step = grid.step();
        let target = Direction::ALL
            .iter()
            .filter_map(|dir| grid.neighbor(here, *dir))
            .filter(|cell| *cell != state.pursuer)
            .map(|cell| {
                let mut score = manhattan(cell, state.pursuer);
                if !state.claimed.contains(cell) {
                    score += step * 2;
                }
                score += self.rng.random_range(0..step);
                (cell, score)
            })
            .max_by_key(|(_, score)| *score)
            .map(|(cell, _)| cell)
            .unwrap_or(here);

        self.wobble(grid, target)
    }

    /// A point inside `cell`'s snapping radius, kept on the playable board
    fn wobble(&mut self, grid: &Grid, cell: IVec2) -> (f32, f32) {
        let reach = grid.step() as f32 * 0.4;
        let lo = grid.min_coord() as f32;
        let hi = grid.max_coord() as f32;
        let dx = self.rng.random_range(-reach..=reach);
        let dy = self.rng.random_range(-reach..=reach);
        (
            (cell.x as f32 + dx).clamp(lo, hi),
            (cell.y as f32 + dy).clamp(lo, hi),
        )
    }
}
