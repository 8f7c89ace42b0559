//! Game rules and timing
//!
//! Stored inside `GameState` so a saved run replays with the rules it was
//! started with. Loadable from JSON on native targets.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives granted by a new game
    pub starting_lives: u8,

    // === Scoring ===
    pub collectible_points: u64,
    pub power_item_points: u64,
    pub capture_points: u64,

    // === Timing ===
    /// Vulnerability window after a power item (ticks)
    pub vulnerable_ticks: u32,
    /// Tick interval on level 1 (ms)
    pub base_tick_ms: u64,
    /// Interval removed per level cleared (ms)
    pub tick_ms_per_level: u64,
    /// Floor for the tick interval (ms)
    pub min_tick_ms: u64,
    /// Delay between clearing a level and starting the next (ms)
    pub level_complete_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,

            collectible_points: COLLECTIBLE_POINTS,
            power_item_points: POWER_ITEM_POINTS,
            capture_points: CAPTURE_POINTS,

            vulnerable_ticks: VULNERABLE_DURATION_TICKS,
            base_tick_ms: BASE_TICK_MS,
            tick_ms_per_level: TICK_MS_PER_LEVEL,
            min_tick_ms: MIN_TICK_MS,
            level_complete_delay_ms: LEVEL_COMPLETE_DELAY_MS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Lift values that would leave a game unplayable
    pub fn validated(mut self) -> Self {
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be at least 1 - using 1");
            self.starting_lives = 1;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Tick interval for a level; ticks get faster as levels advance
    pub fn tick_interval(&self, level: u32) -> Duration {
        let speedup = self
            .tick_ms_per_level
            .saturating_mul(u64::from(level.saturating_sub(1)));
        let ms = self
            .base_tick_ms
            .saturating_sub(speedup)
            .max(self.min_tick_ms)
            .max(1);
        Duration::from_millis(ms)
    }

    /// Level-complete delay expressed in ticks of the given level (at least 1)
    pub fn level_complete_delay_ticks(&self, level: u32) -> u64 {
        let interval = self.tick_interval(level).as_millis() as u64;
        self.level_complete_delay_ms.div_ceil(interval).max(1)
    }
}
