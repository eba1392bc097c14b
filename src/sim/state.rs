//! Game state and core simulation types
//!
//! Everything the tick loop and the input handler mutate lives in one
//! `GameState`, owned by the session.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::claimed::ClaimedCells;
use super::pursuit::AxisPreference;
use crate::consts::*;
use crate::grid::Grid;
use crate::lives_for_level;

/// Which token claimed a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// AI-controlled chaser
    Pursuer,
    /// Pointer-controlled player token
    Evader,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every cell claimed
    Win,
    /// Chaser reached the player
    Capture,
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first pointer input; the chaser does not move
    #[default]
    Idle,
    /// Chaser is hunting the player
    Pursuing,
    /// Round decided; board resets when the countdown runs out
    Resolved {
        outcome: Outcome,
        ticks_left: u32,
        /// Whether the reset also clears the claimed cells
        clear_board: bool,
    },
}

/// Discrete notifications for audio, effects and dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CellClaimed { cell: IVec2, by: Actor },
    Captured { lives_left: u32 },
    LevelComplete { completed: u32, next: u32 },
    /// Last life lost above level 1
    LevelLost { from: u32, to: u32 },
    /// Last life lost on level 1
    GameOver { final_score: u64 },
    /// Score passed the stored high score (once per run)
    HighScore { score: u64 },
    /// Actors back at their start positions
    RoundReset,
}

/// Level, lives and scores; the persisted scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub high_score: u64,
}

impl Default for Progress {
    fn default() -> Self {
        Self::at_level(START_LEVEL)
    }
}

impl Progress {
    /// Fresh progress on `level` with a full set of lives and no score
    pub fn at_level(level: u32) -> Self {
        let level = level.clamp(START_LEVEL, MAX_LEVEL);
        Self {
            level,
            lives: lives_for_level(level),
            score: 0,
            high_score: 0,
        }
    }

    /// Move to `level` and refill lives for it
    pub fn set_level(&mut self, level: u32) {
        self.level = level.clamp(START_LEVEL, MAX_LEVEL);
        self.lives = lives_for_level(self.level);
    }

    /// Add to score; returns true if the high score moved
    pub fn add_score(&mut self, points: u64) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    /// Subtract from score, stopping at zero
    pub fn deduct(&mut self, points: u64) {
        self.score = self.score.saturating_sub(points);
    }
}

/// Tunable gameplay rules (built from settings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub axis: AxisPreference,
    pub capture_penalty: u64,
    pub level_penalty: u64,
    /// Ticks spent in `Resolved` before the board resets
    pub resolve_delay_ticks: u32,
    /// Stop the timer after every round
    pub pause_after_round: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            axis: AxisPreference::Major,
            capture_penalty: CAPTURE_PENALTY,
            level_penalty: LEVEL_PENALTY,
            resolve_delay_ticks: RESOLVE_DELAY_MS.div_ceil(TICK_INTERVAL_MS),
            pause_after_round: true,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub rules: Rules,
    /// Chaser position; moved only by the tick loop
    pub pursuer: IVec2,
    /// Player position; `None` until the first input of a round
    pub evader: Option<IVec2>,
    pub claimed: ClaimedCells,
    pub progress: Progress,
    pub phase: GamePhase,
    /// Timer stopped: ticks and input are ignored
    pub paused: bool,
    /// High-score event already raised this run
    pub record_announced: bool,
    /// Simulation tick counter (unpaused ticks only)
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(grid: Grid, rules: Rules, progress: Progress) -> Self {
        let origin = grid.origin();
        Self {
            grid,
            rules,
            pursuer: origin,
            evader: None,
            claimed: ClaimedCells::starting_at(origin),
            progress,
            phase: GamePhase::Idle,
            paused: false,
            record_announced: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_pursuing(&self) -> bool {
        self.phase == GamePhase::Pursuing
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, GamePhase::Resolved { .. })
    }

    /// Put both actors back at the start and wait for input
    pub fn reset_actors(&mut self) {
        self.pursuer = self.grid.origin();
        self.evader = None;
        self.phase = GamePhase::Idle;
    }

    /// Clear every claim except the origin
    pub fn reset_board(&mut self) {
        self.claimed.reset(self.grid.origin());
    }

    /// True once every cell on the board is claimed
    pub fn board_full(&self) -> bool {
        self.claimed.len() >= self.grid.cell_count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
