//! Camera follow, world extension and pruning
//!
//! The camera never moves; the world does. When the player climbs past the
//! upper third of the surface everything is shifted down by the overshoot,
//! which is also the only way height turns into score.

use rand::Rng;

use super::generator::spawn_next;
use super::state::RunState;
use crate::settings::Settings;

/// Pin an ascending player to the one-third line, returning the scroll applied
pub fn follow_player(run: &mut RunState, settings: &Settings) -> f32 {
    let line = settings.surface_height / 3.0;
    if run.player.pos.y >= line || run.player.vel.y >= 0.0 {
        return 0.0;
    }

    let delta = line - run.player.pos.y;
    run.camera_offset += delta;
    run.player.pos.y += delta;

    for platform in run.platforms.iter_mut() {
        platform.pos.y += delta;
    }
    for spring in run.springs.iter_mut() {
        spring.pos.y += delta;
    }
    for monster in run.monsters.iter_mut() {
        monster.pos.y += delta;
    }

    run.score += delta * settings.height_score_factor;
    delta
}

/// Generate one platform once the frontier has scrolled into the lower half
pub fn extend_world(run: &mut RunState, settings: &Settings, rng: &mut impl Rng) -> bool {
    let needs_more = run
        .frontier()
        .is_none_or(|tail| tail.pos.y > settings.surface_height / 2.0);
    if needs_more {
        spawn_next(run, settings, rng);
    }
    needs_more
}

/// Drop what has scrolled fully below the surface
///
/// Platforms leave one per tick from the head; springs and monsters are
/// filtered as a whole.
pub fn prune_world(run: &mut RunState, settings: &Settings) {
    let floor = settings.surface_height;
    if run.platforms.front().is_some_and(|head| head.pos.y > floor) {
        run.platforms.pop_front();
    }
    run.springs.retain(|s| s.pos.y <= floor);
    run.monsters.retain(|m| m.pos.y <= floor);
}
