//! Pointer input handling
//!
//! Pointer coordinates arrive already translated to board-local pixels.

use super::state::{Actor, GameEvent, GamePhase, GameState};
use crate::claim_reward;

/// Move the player token toward a pointer position.
///
/// Ignored while paused, while a round is resolving, outside the board
/// margins, or when the snapped cell equals the current one. Returns true
/// if the player token moved.
pub fn pointer_moved(state: &mut GameState, x: f32, y: f32) -> bool {
    if state.paused || state.is_resolved() {
        return false;
    }
    if !state.grid.in_bounds(x, y) {
        return false;
    }

    let cell = state.grid.snap(x, y);
    if state.evader == Some(cell) {
        return false;
    }

    if state.phase == GamePhase::Idle {
        log::debug!("Chase started at tick {}", state.time_ticks);
        state.phase = GamePhase::Pursuing;
    }
    state.evader = Some(cell);

    if state.claimed.claim(cell) {
        let reward = claim_reward(state.progress.lives);
        let beat_record = state.progress.add_score(reward);
        state.push_event(GameEvent::CellClaimed {
            cell,
            by: Actor::Evader,
        });
        if beat_record && !state.record_announced {
            state.record_announced = true;
            state.push_event(GameEvent::HighScore {
                score: state.progress.score,
            });
        }
    }
    true
}
