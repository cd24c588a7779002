//! Game settings and tuning
//!
//! Persisted separately from sessions: LocalStorage on the web, a JSON file
//! named by `FRACTION_FOODS_SETTINGS` natively. Missing fields take their
//! defaults, so older settings files keep loading.

use serde::{Deserialize, Serialize};

use crate::celebration::ConfettiBurst;
use crate::consts::*;
use crate::viewport::ThresholdScalePolicy;

/// Inclusive bounds for the two guess inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessBounds {
    pub numerator_min: u32,
    pub numerator_max: u32,
    pub denominator_min: u32,
    pub denominator_max: u32,
}

impl Default for GuessBounds {
    fn default() -> Self {
        Self {
            numerator_min: GUESS_NUMERATOR_MIN,
            numerator_max: GUESS_NUMERATOR_MAX,
            denominator_min: GUESS_DENOMINATOR_MIN,
            denominator_max: GUESS_DENOMINATOR_MAX,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shape size in pixels before viewport scaling
    pub shape_size: f32,
    /// Draw the lines between slices/cells
    pub show_slice_lines: bool,

    // === Feedback timing ===
    /// How long the correct-answer celebration lasts (ms)
    pub celebrate_delay_ms: u32,
    /// How long the wrong-answer shake lasts (ms)
    pub shake_delay_ms: u32,
    pub confetti: ConfettiBurst,

    // === Input ===
    pub guess_bounds: GuessBounds,

    // === Layout ===
    pub scale_policy: ThresholdScalePolicy,

    // === Accessibility ===
    /// Reduced motion (no confetti)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shape_size: DEFAULT_SIZE,
            show_slice_lines: true,

            celebrate_delay_ms: CELEBRATE_DELAY_MS,
            shake_delay_ms: SHAKE_DELAY_MS,
            confetti: ConfettiBurst::default(),

            guess_bounds: GuessBounds::default(),

            scale_policy: ThresholdScalePolicy::default(),

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective confetti (respects reduced_motion)
    pub fn effective_confetti(&self) -> Option<ConfettiBurst> {
        if self.reduced_motion {
            None
        } else {
            Some(self.confetti)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fraction_foods_settings";

    /// Environment variable naming a native settings file
    pub const PATH_ENV: &'static str = "FRACTION_FOODS_SETTINGS";

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

    /// Load settings from the file named by `FRACTION_FOODS_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::PATH_ENV) {
            Some(path) => Self::load_from(std::path::Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the file named by `FRACTION_FOODS_SETTINGS` (no-op if unset)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Some(path) = std::env::var_os(Self::PATH_ENV) {
            let path = std::path::Path::new(&path);
            match self.save_to(path) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Cannot write settings file {}: {}", path.display(), e),
            }
        }
    }

    /// Write settings as JSON to `path`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
