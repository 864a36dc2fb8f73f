//! Game settings and preferences
//!
//! Persisted as JSON in the working directory. A missing or unreadable file
//! silently falls back to defaults; failure to save never interrupts play.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Show the FPS counter on the HUD
    pub show_fps: bool,
    /// Show the world minimap under the play area
    pub show_minimap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.4,
            show_fps: false,
            show_minimap: true,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "astro-assault-settings.json";

    /// Effective sound-effect gain
    pub fn sfx_gain(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(err) => {
                    log::warn!("settings file unreadable ({err}); using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file; using defaults");
                Self::default()
            }
        }
    }

    /// Best effort persistence
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if let Err(err) = std::fs::write(Self::FILE_NAME, json) {
                log::warn!("could not save settings: {err}");
            }
        }
    }
}
