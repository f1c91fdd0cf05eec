//! Sky Hop - An endless vertical platformer simulation
//!
//! Core modules:
//! - `sim`: Simulation (generation, physics, collisions, scrolling)
//! - `engine`: Run lifecycle, timer and host-facing commands
//! - `highscores`: Best-score persistence behind an injected store
//! - `settings`: Data-driven surface and tuning values
//! - `timer`: 1 Hz run clock for single-loop hosts

pub mod engine;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod timer;

pub use engine::{Engine, RunPhase, RunView};
pub use highscores::{HighScoreStore, MemoryStore, PersistenceError};
pub use settings::{Settings, SettingsError};
pub use sim::{BounceKind, Difficulty, EndReason, GameEvent, Intent};

/// Game configuration constants
pub mod consts {
    /// Default drawing surface (matches a portrait phone-ish canvas)
    pub const SURFACE_WIDTH: f32 = 480.0;
    pub const SURFACE_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Vertical acceleration per tick
    pub const PLAYER_GRAVITY: f32 = 0.2;
    /// Upward velocity assigned on a plain bounce (negative is up)
    pub const JUMP_FORCE: f32 = -15.0;

    /// Platform geometry
    pub const PLATFORM_WIDTH: f32 = 70.0;
    pub const BREAKING_PLATFORM_WIDTH: f32 = 50.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    /// Thickness of the landing band below a platform's top edge
    pub const LANDING_BAND: f32 = 10.0;

    /// Vertical spacing between consecutive platforms: BASE + uniform(0, JITTER)
    pub const PLATFORM_GAP_BASE: f32 = 100.0;
    pub const PLATFORM_GAP_JITTER: f32 = 150.0;
    /// Platforms generated up front on each run start
    pub const INITIAL_PLATFORM_COUNT: usize = 372;

    /// Bonus spring geometry
    pub const SPRING_SIZE: f32 = 20.0;
    /// Chance that a normal platform carries a spring
    pub const SPRING_CHANCE: f64 = 0.2;

    /// Monster geometry
    pub const MONSTER_SIZE: f32 = 30.0;
    /// Base spawn chance, scaled by the difficulty coefficient
    pub const MONSTER_CHANCE: f64 = 0.5;

    /// Bounce multipliers applied to JUMP_FORCE
    pub const SPRING_PLATFORM_BOOST: f32 = 1.5;
    pub const BONUS_SPRING_BOOST: f32 = 1.8;
    pub const POUNCE_BOOST: f32 = 1.2;

    /// Ticks a triggered breaking platform survives
    pub const BREAK_DECAY_TICKS: u32 = 30;

    /// Score for defeating a monster
    pub const POUNCE_BONUS: f32 = 50.0;
    /// Score per unit of camera scroll
    pub const HEIGHT_SCORE_FACTOR: f32 = 0.2;
}
