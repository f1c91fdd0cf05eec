//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - Discrete per-tick steps only (no wall-clock deltas)
//! - Randomness is injected by the caller
//! - Platforms keep generation order (front = oldest, back = frontier)

pub mod camera;
pub mod collision;
pub mod generator;
pub mod physics;
pub mod state;
pub mod tick;

pub use camera::{extend_world, follow_player, prune_world};
pub use collision::{Hitbox, resolve_monsters, resolve_platforms, resolve_springs};
pub use generator::{Generated, generate_initial, generate_next, spawn_next};
pub use physics::{integrate_player, wrap_horizontal};
pub use state::{
    BounceKind, Difficulty, EndReason, GameEvent, Intent, Monster, Platform, PlatformKind, Player,
    RunState, Spring,
};
pub use tick::tick;
