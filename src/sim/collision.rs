//! Collision detection and response
//!
//! Resolution runs after integration in a fixed order: platforms, springs,
//! monsters. Each qualifying contact overwrites the player's vertical
//! velocity, so the last one in that order decides the bounce unless a
//! monster ends the run first.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::{BounceKind, EndReason, GameEvent, Monster, Platform, PlatformKind, Player, Spring};
use crate::consts::*;

/// Axis-aligned box in surface coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn mid_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Strict horizontal overlap (touching edges do not count)
    pub fn overlaps_x(&self, other: &Hitbox) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.overlaps_x(other) && self.bottom() > other.top() && self.top() < other.bottom()
    }

    /// Feet inside the thin band at the top of `surface`
    pub fn lands_on(&self, surface: &Hitbox) -> bool {
        self.bottom() >= surface.top()
            && self.bottom() <= surface.top() + LANDING_BAND
            && self.overlaps_x(surface)
    }
}

/// Land on platforms and advance breaking-platform decay
///
/// Only a falling player can land. Triggered breaking platforms count down
/// every tick (the triggering tick included) and are removed in place when
/// the countdown reaches zero.
pub fn resolve_platforms(
    player: &mut Player,
    platforms: &mut VecDeque<Platform>,
    decay_ticks: u32,
    events: &mut Vec<GameEvent>,
) {
    platforms.retain_mut(|platform| {
        let landed = player.vel.y > 0.0 && player.hitbox().lands_on(&platform.hitbox());

        match &mut platform.kind {
            PlatformKind::Normal => {
                if landed {
                    player.bounce(1.0);
                    events.push(GameEvent::Bounce(BounceKind::Normal));
                }
                true
            }
            PlatformKind::Spring => {
                if landed {
                    player.bounce(SPRING_PLATFORM_BOOST);
                    events.push(GameEvent::Bounce(BounceKind::SpringPlatform));
                }
                true
            }
            PlatformKind::Breaking {
                is_breaking,
                break_timer,
            } => {
                if landed && !*is_breaking {
                    *is_breaking = true;
                    *break_timer = decay_ticks;
                    player.bounce(1.0);
                    events.push(GameEvent::Bounce(BounceKind::Normal));
                }
                if *is_breaking {
                    *break_timer = break_timer.saturating_sub(1);
                    return *break_timer > 0;
                }
                true
            }
        }
    });
}

/// Bonus springs: the strongest bounce
pub fn resolve_springs(player: &mut Player, springs: &[Spring], events: &mut Vec<GameEvent>) {
    for spring in springs {
        let hitbox = player.hitbox();
        let spring_box = spring.hitbox();
        if player.vel.y > 0.0
            && hitbox.bottom() >= spring_box.top()
            && hitbox.top() < spring_box.bottom()
            && hitbox.overlaps_x(&spring_box)
        {
            player.bounce(BONUS_SPRING_BOOST);
            events.push(GameEvent::Bounce(BounceKind::BonusSpring));
        }
    }
}

/// Pounce on or die to monsters, then let survivors patrol
///
/// Returns the end reason on a fatal contact; remaining monsters are left
/// untouched for that tick.
pub fn resolve_monsters(
    player: &mut Player,
    monsters: &mut Vec<Monster>,
    surface_width: f32,
    pounce_bonus: f32,
    score: &mut f32,
    events: &mut Vec<GameEvent>,
) -> Option<EndReason> {
    let mut i = 0;
    while i < monsters.len() {
        let hitbox = player.hitbox();
        let monster_box = monsters[i].hitbox();

        if hitbox.overlaps(&monster_box) {
            if player.vel.y > 0.0 && hitbox.bottom() < monster_box.mid_y() {
                monsters.remove(i);
                player.bounce(POUNCE_BOOST);
                *score += pounce_bonus;
                events.push(GameEvent::Bounce(BounceKind::MonsterPounce));
                continue;
            }
            return Some(EndReason::MonsterCollision);
        }

        monsters[i].patrol(surface_width);
        i += 1;
    }
    None
}
