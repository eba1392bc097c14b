//! Flat key-value persistence
//!
//! Four scalars (level, lives, score, high score) stored as decimal strings
//! under fixed keys. Read once at startup, each written as soon as it
//! changes. No envelope, no versioning.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::consts::{MAX_LEVEL, START_LEVEL};
use crate::error::StoreResult;
use crate::lives_for_level;
use crate::sim::Progress;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

pub const KEY_LEVEL: &str = "level";
pub const KEY_LIVES: &str = "lives";
pub const KEY_SCORE: &str = "score";
pub const KEY_HIGH_SCORE: &str = "hscore";

/// A string-to-string store (cookies, LocalStorage, a JSON file...)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory store for tests and the headless demo
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read a scalar, falling back to `default` when absent or malformed
fn read_scalar<T>(store: &impl KeyValueStore, key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    let Some(raw) = store.get(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Ignoring malformed stored {}={:?}, using {}", key, raw, default);
            default
        }
    }
}

/// Load saved progress, with per-key defaults
pub fn load_progress(store: &impl KeyValueStore) -> Progress {
    let stored_level = read_scalar(store, KEY_LEVEL, START_LEVEL);
    let level = stored_level.clamp(START_LEVEL, MAX_LEVEL);
    if level != stored_level {
        log::warn!("Stored level {} out of range, using {}", stored_level, level);
    }
    let mut lives = read_scalar(store, KEY_LIVES, lives_for_level(START_LEVEL));
    if lives == 0 {
        // Zero lives is never saved by a live game; treat it as corrupt
        log::warn!("Stored lives was 0, refilling for level {}", level);
        lives = lives_for_level(level);
    }
    let score = read_scalar(store, KEY_SCORE, 0u64);
    let high_score = read_scalar(store, KEY_HIGH_SCORE, 0u64).max(score);

    log::info!(
        "Loaded progress: level {}, lives {}, score {}, high score {}",
        level,
        lives,
        score,
        high_score
    );
    Progress {
        level,
        lives,
        score,
        high_score,
    }
}

/// Write the scalars that differ between `before` and `after`.
/// Returns the number of keys written.
pub fn save_changes(store: &mut impl KeyValueStore, before: &Progress, after: &Progress) -> usize {
    let mut written = 0;
    if before.level != after.level {
        write_scalar(store, KEY_LEVEL, after.level);
        written += 1;
    }
    if before.lives != after.lives {
        write_scalar(store, KEY_LIVES, after.lives);
        written += 1;
    }
    if before.score != after.score {
        write_scalar(store, KEY_SCORE, after.score);
        written += 1;
    }
    if before.high_score != after.high_score {
        write_scalar(store, KEY_HIGH_SCORE, after.high_score);
        written += 1;
    }
    written
}

fn write_scalar(store: &mut impl KeyValueStore, key: &str, value: impl Display) {
    if let Err(e) = store.set(key, &value.to_string()) {
        log::warn!("Failed to persist {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        let progress = load_progress(&store);
        assert_eq!(progress, Progress::default());
        assert_eq!(progress.lives, 2);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(KEY_LEVEL, "three").unwrap();
        store.set(KEY_LIVES, "").unwrap();
        store.set(KEY_SCORE, "-5").unwrap();
        store.set(KEY_HIGH_SCORE, "42").unwrap();
        let progress = load_progress(&store);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.lives, 2);
        assert_eq!(progress.score, 0);
        assert_eq!(progress.high_score, 42);
    }

    #[test]
    fn test_zero_lives_refilled() {
        let mut store = MemoryStore::new();
        store.set(KEY_LEVEL, "4").unwrap();
        store.set(KEY_LIVES, "0").unwrap();
        assert_eq!(load_progress(&store).lives, 6);
    }

    #[test]
    fn test_huge_stored_level_is_clamped() {
        let mut store = MemoryStore::new();
        store.set(KEY_LEVEL, "1500000000").unwrap();
        store.set(KEY_LIVES, "0").unwrap();
        let mut progress = load_progress(&store);
        assert_eq!(progress.level, MAX_LEVEL);
        assert_eq!(progress.lives, lives_for_level(MAX_LEVEL));

        // Winning from the cap neither panics nor climbs past it
        progress.set_level(progress.level.saturating_add(1));
        assert_eq!(progress.level, MAX_LEVEL);
    }

    #[test]
    fn test_high_score_never_below_score() {
        let mut store = MemoryStore::new();
        store.set(KEY_SCORE, " 80 ").unwrap();
        store.set(KEY_HIGH_SCORE, "10").unwrap();
        let progress = load_progress(&store);
        assert_eq!(progress.score, 80);
        assert_eq!(progress.high_score, 80);
    }

    #[test]
    fn test_save_changes_writes_only_diffs() {
        let mut store = MemoryStore::new();
        let before = Progress::default();
        let mut after = before;
        after.score = 7;
        after.high_score = 7;
        assert_eq!(save_changes(&mut store, &before, &after), 2);
        assert_eq!(store.get(KEY_SCORE).as_deref(), Some("7"));
        assert_eq!(store.get(KEY_HIGH_SCORE).as_deref(), Some("7"));
        assert_eq!(store.get(KEY_LEVEL), None);
        assert_eq!(save_changes(&mut store, &after, &after), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let progress = Progress {
            level: 5,
            lives: 3,
            score: 1234,
            high_score: 2000,
        };
        assert_eq!(save_changes(&mut store, &Progress::default(), &progress), 4);
        assert_eq!(load_progress(&store), progress);
    }
}
