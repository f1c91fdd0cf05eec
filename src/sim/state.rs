//! Game state and core simulation types
//!
//! Everything a single run owns lives here. A fresh `RunState` is built on
//! every start/restart and dropped when the next run begins.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use crate::consts::*;
use crate::settings::Settings;

/// Difficulty selected before a run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Monster density coefficient (Easy never spawns monsters)
    pub fn coefficient(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.0,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Horizontal movement intent, sampled once at the start of every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Per-tick velocity (positive y is down)
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal velocity magnitude while steering
    pub speed: f32,
    /// Added to vel.y every tick
    pub gravity: f32,
    /// Vertical velocity assigned on a plain bounce
    pub jump_force: f32,
    pub is_jumping: bool,
}

impl Player {
    /// Spawn at the middle of the surface, at rest
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.surface_width / 2.0, settings.surface_height / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::splat(settings.player_size),
            speed: settings.player_speed,
            gravity: settings.gravity,
            jump_force: settings.jump_force,
            is_jumping: false,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos, self.size)
    }

    /// Bottom edge (feet)
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Assign an upward velocity scaled from the jump force
    pub fn bounce(&mut self, boost: f32) {
        self.vel.y = self.jump_force * boost;
        self.is_jumping = true;
    }
}

/// Platform variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    /// Springy platform: stronger bounce than normal
    Spring,
    /// Crumbles a fixed number of ticks after the first landing
    Breaking { is_breaking: bool, break_timer: u32 },
}

impl PlatformKind {
    /// Fresh, untriggered breaking platform
    pub const BREAKING: PlatformKind = PlatformKind::Breaking {
        is_breaking: false,
        break_timer: 0,
    };

    pub fn width(&self) -> f32 {
        match self {
            PlatformKind::Breaking { .. } => BREAKING_PLATFORM_WIDTH,
            PlatformKind::Normal | PlatformKind::Spring => PLATFORM_WIDTH,
        }
    }
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Generation sequence number (assigned when added to a run)
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(pos: Vec2, kind: PlatformKind) -> Self {
        Self {
            id: 0,
            pos,
            size: Vec2::new(kind.width(), PLATFORM_HEIGHT),
            kind,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos, self.size)
    }
}

/// A bonus spring sitting on top of a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spring {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Spring {
    /// Centered on top of `platform`
    pub fn on(platform: &Platform) -> Self {
        Self {
            pos: Vec2::new(
                platform.pos.x + platform.size.x / 2.0 - SPRING_SIZE / 2.0,
                platform.pos.y - SPRING_SIZE,
            ),
            size: Vec2::splat(SPRING_SIZE),
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos, self.size)
    }
}

/// A patrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Vec2,
    pub size: Vec2,
    /// -1.0 (left) or +1.0 (right)
    pub direction: f32,
    pub speed: f32,
}

impl Monster {
    /// Hovering centered above `platform`
    pub fn above(platform: &Platform, direction: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                platform.pos.x + platform.size.x / 2.0 - MONSTER_SIZE / 2.0,
                platform.pos.y - MONSTER_SIZE,
            ),
            size: Vec2::splat(MONSTER_SIZE),
            direction,
            speed,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos, self.size)
    }

    /// Patrol one step, reversing when an edge leaves the surface
    pub fn patrol(&mut self, surface_width: f32) {
        self.pos.x += self.direction * self.speed;
        if self.pos.x < 0.0 || self.pos.x + self.size.x > surface_width {
            self.direction = -self.direction;
        }
    }
}

/// What a bounce landed on (hosts map these to sounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BounceKind {
    Normal,
    SpringPlatform,
    BonusSpring,
    MonsterPounce,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Player dropped below the bottom of the surface
    Fell,
    /// Touched a monster without landing on it
    MonsterCollision,
    /// Configured time limit reached
    TimeUp,
}

/// Discrete notifications for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Bounce(BounceKind),
    TimerTick { seconds: u32 },
    NewHighScore { score: f32 },
    RunEnded { final_score: u64, reason: EndReason },
}

/// Complete state of a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub score: f32,
    pub difficulty: Difficulty,
    pub is_running: bool,
    /// Whole seconds since the run started
    pub time_elapsed: u32,
    /// Total scroll applied so far (informational)
    pub camera_offset: f32,
    pub player: Player,
    /// Generation order: front is next to prune, back is the frontier
    pub platforms: VecDeque<Platform>,
    pub springs: Vec<Spring>,
    pub monsters: Vec<Monster>,
    /// Next platform ID
    next_id: u32,
}

impl RunState {
    /// Empty running state with the player spawned; the world is filled by the generator
    pub fn new(settings: &Settings, difficulty: Difficulty) -> Self {
        Self {
            score: 0.0,
            difficulty,
            is_running: true,
            time_elapsed: 0,
            camera_offset: 0.0,
            player: Player::new(settings),
            platforms: VecDeque::new(),
            springs: Vec::new(),
            monsters: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new platform ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Most recently generated platform
    pub fn frontier(&self) -> Option<&Platform> {
        self.platforms.back()
    }

    /// Floored score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}
