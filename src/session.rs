//! Game session: the single owner of a running game
//!
//! Wraps the simulation with the things it must not know about: settings,
//! persistence and the play/pause control. Every public operation persists
//! whatever scalar it changed before returning.

use crate::error::GridError;
use crate::persistence::{self, KeyValueStore};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, Progress};

pub struct GameSession<S: KeyValueStore> {
    settings: Settings,
    state: GameState,
    store: S,
    /// Progress as last written to the store
    saved: Progress,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Build a session from settings, resuming progress from `store`.
    /// The session starts idle and paused.
    pub fn new(settings: Settings, store: S) -> Result<Self, GridError> {
        let grid = settings.grid()?;
        let saved = persistence::load_progress(&store);
        let mut state = GameState::new(grid, settings.rules(), saved);
        state.paused = true;
        Ok(Self {
            settings,
            state,
            store,
            saved,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Timer callback: one simulation tick
    pub fn tick(&mut self) -> Vec<GameEvent> {
        sim::tick(&mut self.state);
        self.persist();
        self.state.drain_events()
    }

    /// Pointer callback with board-local coordinates
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Vec<GameEvent> {
        sim::pointer_moved(&mut self.state, x, y);
        self.persist();
        self.state.drain_events()
    }

    /// Stop the timer. Returns true if the game was running.
    pub fn pause(&mut self) -> bool {
        if self.state.paused {
            return false;
        }
        self.state.paused = true;
        log::info!("Paused at tick {}", self.state.time_ticks);
        true
    }

    /// Restart the timer
    pub fn resume(&mut self) {
        if self.state.paused {
            self.state.paused = false;
            log::info!("Resumed at level {}", self.state.progress.level);
        }
    }

    /// Play/pause control. Returns true if now paused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.state.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.state.paused
    }

    /// Flip the mute preference and save settings. Returns true if now muted.
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.settings.save();
        log::info!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        self.settings.muted
    }

    /// Start over on level 1 with no score; the high score survives
    pub fn new_game(&mut self) {
        let high_score = self.state.progress.high_score;
        let mut progress = Progress::default();
        progress.high_score = high_score;

        let paused = self.state.paused;
        self.state = GameState::new(self.state.grid, self.state.rules, progress);
        self.state.paused = paused;
        log::info!("New game (high score {})", high_score);
        self.persist();
    }

    fn persist(&mut self) {
        let current = self.state.progress;
        if current == self.saved {
            return;
        }
        let written = persistence::save_changes(&mut self.store, &self.saved, &current);
        log::trace!("Persisted {} changed scalars", written);
        self.saved = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KEY_HIGH_SCORE, KEY_LEVEL, KEY_LIVES, KEY_SCORE, MemoryStore};
    use crate::sim::GamePhase;

    fn session() -> GameSession<MemoryStore> {
        GameSession::new(Settings::default(), MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_starts_paused_and_idle() {
        let mut session = session();
        assert!(session.is_paused());
        assert_eq!(session.state().phase, GamePhase::Idle);
        assert!(session.pointer_moved(100.0, 100.0).is_empty());
        assert_eq!(session.state().evader, None);
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = session();
        assert!(!session.toggle_pause());
        assert!(session.toggle_pause());
        assert!(!session.pause());
    }

    #[test]
    fn test_toggle_mute_silences_audio() {
        let mut session = session();
        assert!(session.settings().effective_volume() > 0.0);
        assert!(session.toggle_mute());
        assert_eq!(session.settings().effective_volume(), 0.0);
        assert_eq!(session.settings().effective_music_volume(), 0.0);
        assert!(!session.toggle_mute());
        assert!(session.settings().effective_music_volume() > 0.0);
    }

    #[test]
    fn test_score_persisted_on_claim() {
        let mut session = session();
        session.resume();
        session.pointer_moved(100.0, 100.0);
        assert_eq!(session.store().get(KEY_SCORE).as_deref(), Some("1"));
        assert_eq!(session.store().get(KEY_HIGH_SCORE).as_deref(), Some("1"));
        // Level untouched, never written
        assert_eq!(session.store().get(KEY_LEVEL), None);
    }

    #[test]
    fn test_resumes_stored_progress() {
        let mut store = MemoryStore::new();
        store.set(KEY_LEVEL, "4").unwrap();
        store.set(KEY_LIVES, "2").unwrap();
        store.set(KEY_SCORE, "300").unwrap();
        store.set(KEY_HIGH_SCORE, "900").unwrap();
        let session = GameSession::new(Settings::default(), store).unwrap();
        let progress = session.state().progress;
        assert_eq!(progress.level, 4);
        assert_eq!(progress.lives, 2);
        assert_eq!(progress.score, 300);
        assert_eq!(progress.high_score, 900);
    }

    #[test]
    fn test_new_game_keeps_high_score() {
        let mut store = MemoryStore::new();
        store.set(KEY_LEVEL, "3").unwrap();
        store.set(KEY_SCORE, "250").unwrap();
        store.set(KEY_HIGH_SCORE, "400").unwrap();
        let mut session = GameSession::new(Settings::default(), store).unwrap();
        session.new_game();
        let progress = session.state().progress;
        assert_eq!(progress.level, 1);
        assert_eq!(progress.lives, 2);
        assert_eq!(progress.score, 0);
        assert_eq!(progress.high_score, 400);
        assert_eq!(session.store().get(KEY_LEVEL).as_deref(), Some("1"));
        assert_eq!(session.store().get(KEY_SCORE).as_deref(), Some("0"));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let settings = Settings {
            grid_step: 0,
            ..Settings::default()
        };
        assert!(GameSession::new(settings, MemoryStore::new()).is_err());
    }
}
