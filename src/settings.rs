//! Player settings
//!
//! Read from JSON: a file named by `SPARK_QUIZ_SETTINGS` on native, the
//! `spark_quiz_settings` LocalStorage key in the browser. Settings are never
//! written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why settings could not be read
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Quiz settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Particle feedback on answers and the result burst
    pub particles: bool,
    /// Spinning stars following the pointer
    pub cursor_trail: bool,

    // === Accessibility ===
    /// Reduced motion (no option wobble)
    pub reduced_motion: bool,

    // === Data ===
    /// Particle RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Where the question CSV is fetched or read from
    pub quiz_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            cursor_trail: true,
            reduced_motion: false,
            seed: None,
            quiz_path: "quiz.csv".to_string(),
        }
    }
}

impl Settings {
    /// Environment variable naming a native settings file
    pub const ENV_VAR: &'static str = "SPARK_QUIZ_SETTINGS";

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "spark_quiz_settings";

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The configured seed, or one derived from the clock
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

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
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `SPARK_QUIZ_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {path}: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
