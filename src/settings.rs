//! Overlay settings
//!
//! Supplied by the embedding page as JSON at construction time. Never
//! persisted; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Host-tunable configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Simulated milliseconds per tick
    pub tick_interval_ms: u32,
    /// Maximum ticks run per frame when catching up
    pub max_substeps: u32,

    // === Window ===
    /// Gap kept between the window and every viewport edge (px)
    pub window_margin: f32,
    /// Initial top-left is `viewport / 2 - open_offset` on each axis (px)
    pub open_offset: f32,

    // === Rendering hints ===
    /// Cell slide transition for the presentation layer (ms)
    pub transition_ms: u32,

    // === Storage ===
    /// LocalStorage key for the best score
    pub storage_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,
            window_margin: WINDOW_MARGIN,
            open_offset: WINDOW_OPEN_OFFSET,
            transition_ms: 90,
            storage_key: crate::highscores::STORAGE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                reason: "must be positive",
            });
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be positive",
            });
        }
        if !self.window_margin.is_finite() || self.window_margin < 0.0 {
            return Err(SettingsError::Invalid {
                field: "window_margin",
                reason: "must be a non-negative number",
            });
        }
        if !self.open_offset.is_finite() {
            return Err(SettingsError::Invalid {
                field: "open_offset",
                reason: "must be a number",
            });
        }
        if self.storage_key.is_empty() {
            return Err(SettingsError::Invalid {
                field: "storage_key",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}
