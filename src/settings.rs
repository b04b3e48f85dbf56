//! Player preferences
//!
//! Cosmetic only; physics constants live in `consts`. Persisted as JSON in
//! LocalStorage on the web and read from `PLINKO_SETTINGS` on native.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Halo around pegs after contact
    pub glow_effects: bool,
    /// White overlay on containers after a landing
    pub flash_effects: bool,
    /// Point values drawn on containers
    pub point_labels: bool,

    // === Controls ===
    /// Balls dropped by the "drop multiple" action
    pub batch_size: u32,

    // === Accessibility ===
    /// Reduced motion (no glows or flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            glow_effects: true,
            flash_effects: true,
            point_labels: true,
            batch_size: 5,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective peg glow (respects reduced_motion)
    pub fn effective_glow(&self) -> bool {
        self.glow_effects && !self.reduced_motion
    }

    /// Effective container flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash_effects && !self.reduced_motion
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse, falling back to defaults (and logging) on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "plinko_drop_settings";

    /// Environment variable naming a settings file on native
    pub const ENV_PATH: &'static str = "PLINKO_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `PLINKO_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
