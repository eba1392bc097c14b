//! Fixed-interval simulation tick
//!
//! Called once per timer period. Moves the chaser up to `level` cells toward
//! the player, claims the cell it ends on, and decides the round.

use super::outcome::resolve;
use super::pursuit::{StepOutcome, advance};
use super::state::{Actor, GameEvent, GamePhase, GameState, Outcome};

/// Advance the game state by one timer period
pub fn tick(state: &mut GameState) {
    if state.paused {
        return;
    }
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle => {}
        GamePhase::Pursuing => chase(state),
        GamePhase::Resolved {
            outcome,
            ticks_left,
            clear_board,
        } => {
            let remaining = ticks_left.saturating_sub(1);
            if remaining == 0 {
                finish_round(state, clear_board);
            } else {
                state.phase = GamePhase::Resolved {
                    outcome,
                    ticks_left: remaining,
                    clear_board,
                };
            }
        }
    }
}

fn chase(state: &mut GameState) {
    let Some(target) = state.evader else {
        return;
    };

    let start = state.pursuer;
    let mut caught = false;
    for _ in 0..state.progress.level {
        match advance(&state.grid, state.pursuer, target, state.rules.axis) {
            StepOutcome::Captured => {
                caught = true;
                break;
            }
            StepOutcome::Moved(next) => state.pursuer = next,
            StepOutcome::Blocked => {}
        }
    }
    caught |= state.pursuer == target;

    // Only the cell the chaser ends the tick on is claimed
    let landed = state.pursuer;
    if landed != start && state.claimed.claim(landed) {
        state.push_event(GameEvent::CellClaimed {
            cell: landed,
            by: Actor::Pursuer,
        });
    }

    let outcome = if state.board_full() {
        Outcome::Win
    } else if caught {
        Outcome::Capture
    } else {
        return;
    };

    log::debug!("Round decided at tick {}: {:?}", state.time_ticks, outcome);
    resolve(state, outcome);

    if let GamePhase::Resolved {
        ticks_left: 0,
        clear_board,
        ..
    } = state.phase
    {
        finish_round(state, clear_board);
    }
}

/// Reset the actors (and board if required) after a decided round
fn finish_round(state: &mut GameState, clear_board: bool) {
    if clear_board {
        state.reset_board();
    }
    state.reset_actors();
    state.push_event(GameEvent::RoundReset);
    if state.rules.pause_after_round {
        state.paused = true;
    }
    log::debug!(
        "Round reset (board cleared: {}), {} cells claimed",
        clear_board,
        state.claimed.len()
    );
}
