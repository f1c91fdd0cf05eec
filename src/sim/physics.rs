//! Player kinematics
//!
//! One discrete step per tick; nothing here reads the wall clock.

use super::state::{Intent, Player};

/// Steer, fall, move, and wrap around the horizontal edges
pub fn integrate_player(player: &mut Player, intent: Intent, surface_width: f32) {
    // Left wins when both directions are held
    player.vel.x = if intent.left {
        -player.speed
    } else if intent.right {
        player.speed
    } else {
        0.0
    };

    player.vel.y += player.gravity;
    player.pos += player.vel;

    wrap_horizontal(player, surface_width);
}

/// Toroidal x: re-enter from the opposite side once fully off-surface
pub fn wrap_horizontal(player: &mut Player, surface_width: f32) {
    if player.pos.x < -player.size.x {
        player.pos.x = surface_width;
    } else if player.pos.x > surface_width {
        player.pos.x = -player.size.x;
    }
}
