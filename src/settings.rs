//! Startup configuration
//!
//! Read once when the simulation is created; not reconfigurable while it
//! runs. Every field has a default, so a partial JSON file is valid.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Balls seeded at startup and on every reset
    pub body_count: usize,
    /// Radius range [min, max) in pixels
    pub min_radius: f64,
    pub max_radius: f64,
    /// Speed range [min, max) in pixels per second
    pub min_speed: f64,
    pub max_speed: f64,
    /// Initial arena size
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// RNG seed; the front end picks one from the clock when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            body_count: NUM_BALLS,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values that would create invalid balls with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.min_radius > 0.0 && self.max_radius >= self.min_radius && self.max_radius.is_finite()) {
            log::warn!(
                "Invalid radius range [{}, {}), using [{}, {})",
                self.min_radius,
                self.max_radius,
                defaults.min_radius,
                defaults.max_radius
            );
            self.min_radius = defaults.min_radius;
            self.max_radius = defaults.max_radius;
        }

        if !(self.min_speed >= 0.0 && self.max_speed >= self.min_speed && self.max_speed.is_finite()) {
            log::warn!(
                "Invalid speed range [{}, {}), using [{}, {})",
                self.min_speed,
                self.max_speed,
                defaults.min_speed,
                defaults.max_speed
            );
            self.min_speed = defaults.min_speed;
            self.max_speed = defaults.max_speed;
        }

        if !(self.viewport_width >= 0.0 && self.viewport_width.is_finite()) {
            log::warn!("Invalid viewport width {}", self.viewport_width);
            self.viewport_width = defaults.viewport_width;
        }
        if !(self.viewport_height >= 0.0 && self.viewport_height.is_finite()) {
            log::warn!("Invalid viewport height {}", self.viewport_height);
            self.viewport_height = defaults.viewport_height;
        }

        self
    }
}
