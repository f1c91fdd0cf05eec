//! Per-frame simulation tick
//!
//! Physics, then collisions, then camera. Any end condition found along the
//! way stops the tick right there and is handed back to the caller, which
//! owns the end-of-run transition.

use rand::Rng;

use super::camera::{extend_world, follow_player, prune_world};
use super::collision::{resolve_monsters, resolve_platforms, resolve_springs};
use super::physics::integrate_player;
use super::state::{EndReason, GameEvent, Intent, RunState};
use crate::settings::Settings;

/// Advance a running run by one discrete step
///
/// Returns the reason the run must end, if any. A run that is no longer
/// running is left untouched.
pub fn tick(
    run: &mut RunState,
    intent: Intent,
    settings: &Settings,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> Option<EndReason> {
    if !run.is_running {
        return None;
    }

    integrate_player(&mut run.player, intent, settings.surface_width);

    resolve_platforms(
        &mut run.player,
        &mut run.platforms,
        settings.break_decay_ticks,
        events,
    );
    resolve_springs(&mut run.player, &run.springs, events);
    if let Some(reason) = resolve_monsters(
        &mut run.player,
        &mut run.monsters,
        settings.surface_width,
        settings.pounce_bonus,
        &mut run.score,
        events,
    ) {
        return Some(reason);
    }

    follow_player(run, settings);
    extend_world(run, settings, rng);
    prune_world(run, settings);

    if run.player.pos.y > settings.surface_height {
        return Some(EndReason::Fell);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generator::generate_initial;
    use crate::sim::state::{BounceKind, Difficulty, Monster, Platform, PlatformKind};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bare_run(settings: &Settings) -> RunState {
        RunState::new(settings, Difficulty::Easy)
    }

    #[test]
    fn test_landing_scenario() {
        let settings = Settings::default();
        let mut run = bare_run(&settings);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        // Falling at dy=5; after gravity and the move the feet land 3 units into the band
        run.player.pos = Vec2::new(200.0, 400.0);
        run.player.vel = Vec2::new(0.0, 5.0);
        let feet_after_move = 400.0 + 40.0 + 5.2;
        run.platforms.push_back(Platform::new(
            Vec2::new(190.0, feet_after_move - 3.0),
            PlatformKind::Normal,
        ));

        let outcome = tick(&mut run, Intent::default(), &settings, &mut rng, &mut events);

        assert_eq!(outcome, None);
        assert_eq!(run.player.vel.y, settings.jump_force);
        assert!(run.player.is_jumping);
        assert_eq!(events, vec![GameEvent::Bounce(BounceKind::Normal)]);
    }

    #[test]
    fn test_falling_off_the_bottom_ends_run() {
        let settings = Settings::default();
        let mut run = bare_run(&settings);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        run.player.pos.y = settings.surface_height - 1.0;
        run.player.vel.y = 4.0;
        let outcome = tick(&mut run, Intent::default(), &settings, &mut rng, &mut events);
        assert_eq!(outcome, Some(EndReason::Fell));
    }

    #[test]
    fn test_monster_contact_preempts_camera() {
        let settings = Settings::default();
        let mut run = bare_run(&settings);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        // Rising fast into a monster above the one-third line
        run.player.pos = Vec2::new(100.0, 150.0);
        run.player.vel = Vec2::new(0.0, -10.0);
        let anchor = Platform::new(Vec2::new(100.0, 200.0), PlatformKind::Normal);
        let mut monster = Monster::above(&anchor, 1.0, 1.0);
        monster.pos = Vec2::new(105.0, 120.0);
        run.monsters.push(monster);

        let outcome = tick(&mut run, Intent::default(), &settings, &mut rng, &mut events);

        assert_eq!(outcome, Some(EndReason::MonsterCollision));
        assert_eq!(run.camera_offset, 0.0, "camera must not run after a fatal contact");
        assert_eq!(run.score, 0.0);
    }

    #[test]
    fn test_stopped_run_is_inert() {
        let settings = Settings::default();
        let mut run = bare_run(&settings);
        run.is_running = false;
        let before = run.player.pos;
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        assert_eq!(tick(&mut run, Intent::default(), &settings, &mut rng, &mut events), None);
        assert_eq!(run.player.pos, before);
    }

    #[test]
    fn test_first_bounce_from_start_platform() {
        let settings = Settings::default();
        let mut run = RunState::new(&settings, Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(21);
        generate_initial(&mut run, &settings, &mut rng);
        // Nothing may sit where the player drops onto the start platform
        run.springs.clear();
        let mut events = Vec::new();

        let mut bounced = false;
        for _ in 0..60 {
            assert_eq!(tick(&mut run, Intent::default(), &settings, &mut rng, &mut events), None);
            if run.player.vel.y < 0.0 {
                bounced = true;
                break;
            }
        }
        assert!(bounced, "player should land on the start platform");
    }

    #[test]
    fn test_climb_extends_and_prunes_in_order() {
        let settings = Settings {
            initial_platform_count: 5,
            ..Settings::default()
        };
        let mut run = RunState::new(&settings, Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(8);
        generate_initial(&mut run, &settings, &mut rng);
        let mut events = Vec::new();

        let initial_tail = run.frontier().map(|p| p.id).unwrap();
        let mut head = run.platforms.front().map(|p| p.id).unwrap();
        let mut pruned = 0;

        for _ in 0..600 {
            // Keep climbing so the camera scrolls every tick
            run.player.vel.y = settings.jump_force;
            assert_eq!(tick(&mut run, Intent::default(), &settings, &mut rng, &mut events), None);

            let ids: Vec<u32> = run.platforms.iter().map(|p| p.id).collect();
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "out of order: {ids:?}");

            let front = run.platforms.front().map(|p| p.id).unwrap();
            if front != head {
                assert!(front > head);
                pruned += 1;
                head = front;
            }
        }

        let extended = run.frontier().map(|p| p.id).unwrap() - initial_tail;
        assert!(extended > 3, "only {extended} platforms generated by extension");
        assert!(pruned > 3, "only {pruned} head prunes");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn score_never_decreases_and_order_holds(
                seed in 0u64..1000,
                moves in proptest::collection::vec((any::<bool>(), any::<bool>()), 50..400)
            ) {
                let settings = Settings::default();
                let mut run = RunState::new(&settings, Difficulty::Hard);
                let mut rng = Pcg32::seed_from_u64(seed);
                generate_initial(&mut run, &settings, &mut rng);
                let mut events = Vec::new();
                let mut last_score = run.score;

                for (left, right) in moves {
                    let outcome = tick(&mut run, Intent { left, right }, &settings, &mut rng, &mut events);

                    prop_assert!(run.score >= last_score);
                    last_score = run.score;

                    prop_assert!(
                        run.player.pos.x >= -run.player.size.x
                            && run.player.pos.x <= settings.surface_width
                    );

                    // Head is the oldest platform, tail the newest
                    let ids: Vec<u32> = run.platforms.iter().map(|p| p.id).collect();
                    prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));

                    if outcome.is_some() {
                        break;
                    }
                }
            }
        }
    }
}
