//! Grid Chase - dodge the chaser, claim the board
//!
//! Core modules:
//! - `grid`: Lattice geometry (bounds, snapping, neighbours)
//! - `sim`: Deterministic simulation (pursuit, tick loop, outcomes)
//! - `session`: Single owner of the game state, wires in persistence
//! - `persistence`: Flat key-value scalar storage
//! - `settings`: Data-driven game configuration
//! - `render`: Draw list for the presentation layer
//! - `audio`: Event to sound mapping (Web Audio playback on wasm)
//! - `autopilot`: Seeded scripted player for the native demo

pub mod audio;
pub mod autopilot;
pub mod error;
pub mod grid;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{GridError, StoreError};
pub use grid::{Direction, Grid};
pub use session::GameSession;
pub use settings::{AxisPreference, Settings};

/// Game configuration constants
pub mod consts {
    /// Distance between neighbouring lattice intersections (pixels)
    pub const GRID_STEP: i32 = 25;
    /// Board edge length (pixels); cells span [GRID_STEP, BOARD_SIZE - GRID_STEP]
    pub const BOARD_SIZE: i32 = 625;

    /// Timer period driving the tick loop
    pub const TICK_INTERVAL_MS: u32 = 100;
    /// Pause between a win/capture and the board reset
    pub const RESOLVE_DELAY_MS: u32 = 1000;

    /// Score lost on a capture that leaves lives remaining
    pub const CAPTURE_PENALTY: u64 = 50;
    /// Score lost per level when the last life goes and the level drops
    pub const LEVEL_PENALTY: u64 = 100;

    /// Level a fresh game starts on
    pub const START_LEVEL: u32 = 1;
    /// Highest reachable level; stored values above it are clamped
    pub const MAX_LEVEL: u32 = 1000;
}

/// Lives granted on entering `level`: `round(level * 1.5)`, halves rounding up
#[inline]
pub fn lives_for_level(level: u32) -> u32 {
    level.saturating_mul(3).div_ceil(2)
}

/// Score for one newly claimed cell: `round(lives / 2)`, halves rounding up
#[inline]
pub fn claim_reward(lives: u32) -> u64 {
    u64::from(lives.div_ceil(2))
}
