//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One timer period per `tick`, no wall-clock reads
//! - No randomness
//! - Stable claim order (insertion order)
//! - No rendering, audio or storage dependencies

pub mod claimed;
pub mod input;
pub mod outcome;
pub mod pursuit;
pub mod state;
pub mod tick;

pub use claimed::ClaimedCells;
pub use input::pointer_moved;
pub use outcome::resolve;
pub use pursuit::{AxisPreference, Pursuit, StepOutcome, advance, best_move, tie_break};
pub use state::{Actor, GameEvent, GamePhase, GameState, Outcome, Progress, Rules};
pub use tick::tick;
