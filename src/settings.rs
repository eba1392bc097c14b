//! Game settings and preferences
//!
//! Persisted separately from progress: LocalStorage JSON on the web, an
//! optional JSON file (path in `GRID_CHASE_SETTINGS`) on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GridError;
use crate::grid::Grid;
pub use crate::sim::pursuit::AxisPreference;
use crate::sim::state::Rules;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Lattice spacing (pixels)
    pub grid_step: i32,
    /// Board edge length (pixels)
    pub board_size: i32,

    // === Timing ===
    /// Timer period driving the chaser
    pub tick_interval_ms: u32,
    /// Pause after a win/capture before the board resets
    pub resolve_delay_ms: u32,
    /// Stop the timer after every round (press play to continue)
    pub pause_after_round: bool,

    // === Rules ===
    /// Which axis the chaser closes first
    pub pursuit_axis: AxisPreference,
    /// Score lost when caught with lives to spare
    pub capture_penalty: u64,
    /// Score lost per level when the last life goes
    pub level_penalty: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Pause when window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_step: GRID_STEP,
            board_size: BOARD_SIZE,

            tick_interval_ms: TICK_INTERVAL_MS,
            resolve_delay_ms: RESOLVE_DELAY_MS,
            pause_after_round: true,

            pursuit_axis: AxisPreference::Major,
            capture_penalty: CAPTURE_PENALTY,
            level_penalty: LEVEL_PENALTY,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Validated board geometry
    pub fn grid(&self) -> Result<Grid, GridError> {
        Grid::new(self.grid_step, self.board_size)
    }

    /// Tick interval, never zero
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms.max(1)
    }

    /// Gameplay rules derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            axis: self.pursuit_axis,
            capture_penalty: self.capture_penalty,
            level_penalty: self.level_penalty,
            resolve_delay_ticks: self.resolve_delay_ms.div_ceil(self.tick_interval_ms()),
            pause_after_round: self.pause_after_round,
        }
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective background music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON; unknown keys are ignored, missing keys default
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "grid_chase_settings";

    /// Environment variable naming a native settings file
    pub const ENV_PATH: &'static str = "GRID_CHASE_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `GRID_CHASE_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            return;
        };
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to save settings to {}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}
