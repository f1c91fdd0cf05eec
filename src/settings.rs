//! Surface size and gameplay tuning
//!
//! Every field has a default, so a settings file only needs the values it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Difficulty;

/// Why a settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub gravity: f32,
    /// Negative: up is toward smaller y
    pub jump_force: f32,

    // === World ===
    pub initial_platform_count: usize,
    pub platform_gap_base: f32,
    pub platform_gap_jitter: f32,
    pub spring_chance: f64,
    /// Multiplied by the difficulty coefficient
    pub monster_chance: f64,
    pub break_decay_ticks: u32,

    // === Scoring ===
    pub pounce_bonus: f32,
    pub height_score_factor: f32,

    // === Run ===
    /// Seconds before a run times out; `None` counts up forever
    pub time_limit: Option<u32>,
    /// Difficulty used until the host selects another
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            gravity: PLAYER_GRAVITY,
            jump_force: JUMP_FORCE,

            initial_platform_count: INITIAL_PLATFORM_COUNT,
            platform_gap_base: PLATFORM_GAP_BASE,
            platform_gap_jitter: PLATFORM_GAP_JITTER,
            spring_chance: SPRING_CHANCE,
            monster_chance: MONSTER_CHANCE,
            break_decay_ticks: BREAK_DECAY_TICKS,

            pounce_bonus: POUNCE_BONUS,
            height_score_factor: HEIGHT_SCORE_FACTOR,

            time_limit: None,
            difficulty: Difficulty::Easy,
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

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.surface_width > 0.0 && self.surface_height > 0.0) {
            return Err(SettingsError::Invalid("surface must have a positive size".into()));
        }
        if self.player_size <= 0.0 {
            return Err(SettingsError::Invalid("player_size must be positive".into()));
        }
        if self.gravity <= 0.0 {
            return Err(SettingsError::Invalid("gravity must be positive".into()));
        }
        if self.jump_force >= 0.0 {
            return Err(SettingsError::Invalid("jump_force must be negative (upward)".into()));
        }
        if !(0.0..=1.0).contains(&self.spring_chance) {
            return Err(SettingsError::Invalid("spring_chance must be within 0..=1".into()));
        }
        if self.monster_chance < 0.0 {
            return Err(SettingsError::Invalid("monster_chance must not be negative".into()));
        }
        if self.platform_gap_base <= 0.0 || self.platform_gap_jitter < 0.0 {
            return Err(SettingsError::Invalid("platform gaps must climb upward".into()));
        }
        // Score may only grow during a run
        if !(self.pounce_bonus >= 0.0 && self.height_score_factor >= 0.0) {
            return Err(SettingsError::Invalid(
                "pounce_bonus and height_score_factor must not be negative".into(),
            ));
        }
        Ok(())
    }
}
