//! Draw list generation
//!
//! Turns a `GameState` into a flat list of 2D primitives. The canvas
//! front-end executes the list; nothing here touches a drawing API.

use glam::IVec2;

use crate::sim::{GamePhase, GameState, Outcome};

/// Token radius (pixels)
pub const DOT_RADIUS: f64 = 10.0;

/// Palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Board,
    GridLine,
    Claimed,
    Pursuer,
    Evader,
    Outline,
    Overlay,
    Text,
}

impl Color {
    /// CSS color string
    pub fn css(&self) -> &'static str {
        match self {
            Color::Board => "black",
            Color::GridLine => "dimgray",
            Color::Claimed => "green",
            Color::Pursuer => "red",
            Color::Evader => "blue",
            Color::Outline => "black",
            Color::Overlay => "gray",
            Color::Text => "lightblue",
        }
    }
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole board
    Clear { size: i32, color: Color },
    Line { from: IVec2, to: IVec2, color: Color },
    Dot { center: IVec2, color: Color },
    /// Translucent overlay with centered text
    Banner { text: String },
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub high_score: u64,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCmd>,
    pub hud: Hud,
}

impl Scene {
    pub fn build(state: &GameState) -> Self {
        let grid = &state.grid;
        let mut commands = Vec::with_capacity(state.claimed.len() + grid.cells_per_axis() * 2 + 4);

        commands.push(DrawCmd::Clear {
            size: grid.board_size(),
            color: Color::Board,
        });

        let (lo, hi) = (grid.min_coord(), grid.max_coord());
        for i in (lo..=hi).step_by(grid.step() as usize) {
            commands.push(DrawCmd::Line {
                from: IVec2::new(i, lo),
                to: IVec2::new(i, hi),
                color: Color::GridLine,
            });
            commands.push(DrawCmd::Line {
                from: IVec2::new(lo, i),
                to: IVec2::new(hi, i),
                color: Color::GridLine,
            });
        }

        commands.extend(state.claimed.iter().map(|center| DrawCmd::Dot {
            center,
            color: Color::Claimed,
        }));
        commands.push(DrawCmd::Dot {
            center: state.pursuer,
            color: Color::Pursuer,
        });
        if let Some(evader) = state.evader {
            commands.push(DrawCmd::Dot {
                center: evader,
                color: Color::Evader,
            });
        }

        if let Some(text) = banner_text(state) {
            commands.push(DrawCmd::Banner { text });
        }

        let progress = state.progress;
        Self {
            commands,
            hud: Hud {
                score: progress.score,
                level: progress.level,
                lives: progress.lives,
                high_score: progress.high_score,
            },
        }
    }
}

fn banner_text(state: &GameState) -> Option<String> {
    match state.phase {
        GamePhase::Resolved {
            outcome: Outcome::Win,
            ..
        } => Some(format!("You won level {}!", state.progress.level.saturating_sub(1))),
        GamePhase::Resolved {
            outcome: Outcome::Capture,
            clear_board: false,
            ..
        } => Some("Caught!".to_string()),
        GamePhase::Resolved {
            outcome: Outcome::Capture,
            clear_board: true,
            ..
        } => Some("Out of lives!".to_string()),
        _ if state.paused => Some("Game Paused".to_string()),
        _ => None,
    }
}
