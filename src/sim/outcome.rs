//! Round resolution: score, lives and level bookkeeping
//!
//! Applied once, at the moment a round is decided. The board itself is
//! reset later by the tick loop, when the resolve countdown runs out.

use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// Apply the bookkeeping for `outcome` and enter `Resolved`
pub fn resolve(state: &mut GameState, outcome: Outcome) {
    let clear_board = match outcome {
        Outcome::Win => resolve_win(state),
        Outcome::Capture => resolve_capture(state),
    };
    state.phase = GamePhase::Resolved {
        outcome,
        ticks_left: state.rules.resolve_delay_ticks,
        clear_board,
    };
}

/// Level up and refill lives. Always clears the board.
fn resolve_win(state: &mut GameState) -> bool {
    let completed = state.progress.level;
    state.progress.set_level(completed.saturating_add(1));
    log::info!(
        "Level {} complete, now level {} with {} lives",
        completed,
        state.progress.level,
        state.progress.lives
    );
    state.push_event(GameEvent::LevelComplete {
        completed,
        next: state.progress.level,
    });
    true
}

/// Take a life; on the last one drop a level (or end the game on level 1).
/// Returns true when the board must be cleared.
fn resolve_capture(state: &mut GameState) -> bool {
    let progress = &mut state.progress;
    progress.lives = progress.lives.saturating_sub(1);
    let lives_left = progress.lives;

    if lives_left > 0 {
        progress.deduct(state.rules.capture_penalty);
        log::info!("Caught! {} lives left, score {}", lives_left, progress.score);
        state.push_event(GameEvent::Captured { lives_left });
        return false;
    }

    let level = progress.level;
    if level > 1 {
        progress.deduct(state.rules.level_penalty.saturating_mul(u64::from(level)));
        progress.set_level(level - 1);
        log::info!("Lost level {}, back to level {}", level, progress.level);
        state.push_event(GameEvent::Captured { lives_left });
        state.push_event(GameEvent::LevelLost {
            from: level,
            to: state.progress.level,
        });
    } else {
        let final_score = progress.score;
        progress.score = 0;
        progress.set_level(1);
        log::info!("Game over with score {}", final_score);
        state.record_announced = false;
        state.push_event(GameEvent::Captured { lives_left });
        state.push_event(GameEvent::GameOver { final_score });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_LEVEL;
    use crate::grid::Grid;
    use crate::lives_for_level;
    use crate::sim::state::{Progress, Rules};

    fn state_with(level: u32, lives: u32, score: u64) -> GameState {
        let progress = Progress {
            level,
            lives,
            score,
            high_score: score,
        };
        GameState::new(Grid::default(), Rules::default(), progress)
    }

    #[test]
    fn test_win_levels_up() {
        let mut state = state_with(2, 1, 40);
        resolve(&mut state, Outcome::Win);
        assert_eq!(state.progress.level, 3);
        assert_eq!(state.progress.lives, 5);
        assert_eq!(state.progress.score, 40);
        assert_eq!(
            state.phase,
            GamePhase::Resolved {
                outcome: Outcome::Win,
                ticks_left: 10,
                clear_board: true
            }
        );
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelComplete { completed: 2, next: 3 }]
        );
    }

    #[test]
    fn test_win_on_huge_level_does_not_overflow() {
        let mut state = state_with(1_500_000_000, 1, 0);
        resolve(&mut state, Outcome::Win);
        assert_eq!(state.progress.level, MAX_LEVEL);
        assert_eq!(state.progress.lives, lives_for_level(MAX_LEVEL));

        let mut state = state_with(MAX_LEVEL, 1, 0);
        resolve(&mut state, Outcome::Win);
        assert_eq!(state.progress.level, MAX_LEVEL);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelComplete {
                completed: MAX_LEVEL,
                next: MAX_LEVEL
            }]
        );
    }

    #[test]
    fn test_capture_with_lives_left_takes_flat_penalty() {
        let mut state = state_with(3, 4, 120);
        resolve(&mut state, Outcome::Capture);
        assert_eq!(state.progress.level, 3);
        assert_eq!(state.progress.lives, 3);
        assert_eq!(state.progress.score, 70);
        assert!(matches!(
            state.phase,
            GamePhase::Resolved { clear_board: false, .. }
        ));
    }

    #[test]
    fn test_capture_penalty_clamps_at_zero() {
        let mut state = state_with(1, 2, 20);
        resolve(&mut state, Outcome::Capture);
        assert_eq!(state.progress.score, 0);
        assert_eq!(state.progress.lives, 1);
    }

    #[test]
    fn test_last_life_above_level_one_demotes() {
        let mut state = state_with(3, 1, 1000);
        resolve(&mut state, Outcome::Capture);
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.progress.lives, 3);
        assert_eq!(state.progress.score, 700);
        assert!(matches!(state.phase, GamePhase::Resolved { clear_board: true, .. }));
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Captured { lives_left: 0 },
                GameEvent::LevelLost { from: 3, to: 2 }
            ]
        );
    }

    #[test]
    fn test_demotion_penalty_clamps_at_zero() {
        let mut state = state_with(3, 1, 120);
        resolve(&mut state, Outcome::Capture);
        assert_eq!(state.progress.score, 0);
    }

    #[test]
    fn test_last_life_on_level_one_is_game_over() {
        let mut state = state_with(1, 1, 90);
        state.record_announced = true;
        resolve(&mut state, Outcome::Capture);
        assert_eq!(state.progress.level, 1);
        assert_eq!(state.progress.lives, 2);
        assert_eq!(state.progress.score, 0);
        assert_eq!(state.progress.high_score, 90);
        assert!(!state.record_announced);
        assert!(state
            .drain_events()
            .contains(&GameEvent::GameOver { final_score: 90 }));
    }
}
