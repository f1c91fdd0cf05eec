//! Procedural world generation
//!
//! Platforms are stacked upward from a frontier with a randomized but
//! bounded vertical gap, so every new platform stays inside the player's
//! jump arc. Springs and monsters hang off freshly placed platforms.

use glam::Vec2;
use rand::Rng;

use super::state::{Difficulty, Monster, Platform, PlatformKind, RunState, Spring};
use crate::settings::Settings;

/// One generation step: a platform and whatever rides on it
#[derive(Debug, Clone)]
pub struct Generated {
    pub platform: Platform,
    pub spring: Option<Spring>,
    pub monster: Option<Monster>,
}

/// Weighted variant draw: Normal x4, Spring x1, Breaking x1
fn pick_kind(rng: &mut impl Rng) -> PlatformKind {
    match rng.random_range(0..6) {
        0..=3 => PlatformKind::Normal,
        4 => PlatformKind::Spring,
        _ => PlatformKind::BREAKING,
    }
}

/// Produce exactly one platform above `frontier_y`
pub fn generate_next(
    frontier_y: f32,
    settings: &Settings,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Generated {
    let kind = pick_kind(rng);
    let width = kind.width();

    let max_x = (settings.surface_width - width).max(0.0);
    let x = rng.random::<f32>() * max_x;
    let gap = settings.platform_gap_base + rng.random::<f32>() * settings.platform_gap_jitter;
    let platform = Platform::new(Vec2::new(x, frontier_y - gap), kind);

    let spring_chance = settings.spring_chance.clamp(0.0, 1.0);
    let spring = (kind == PlatformKind::Normal && rng.random_bool(spring_chance))
        .then(|| Spring::on(&platform));

    // Easy has a zero coefficient: skip the draw entirely
    let monster_chance = (settings.monster_chance * difficulty.coefficient()).clamp(0.0, 1.0);
    let monster = (monster_chance > 0.0 && rng.random_bool(monster_chance)).then(|| {
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let speed = rng.random_range(1.0..2.0);
        Monster::above(&platform, direction, speed)
    });

    Generated {
        platform,
        spring,
        monster,
    }
}

/// Append a generated step to the run's collections
pub fn push_generated(run: &mut RunState, mut generated: Generated) {
    generated.platform.id = run.next_entity_id();
    run.platforms.push_back(generated.platform);
    run.springs.extend(generated.spring);
    run.monsters.extend(generated.monster);
}

/// Populate a fresh run: a guaranteed platform under the player, then the initial stack
///
/// The first stacked platform is measured from the bottom of the surface, so
/// the lower screen is populated as well as the space above the player.
pub fn generate_initial(run: &mut RunState, settings: &Settings, rng: &mut impl Rng) {
    run.platforms.clear();
    run.springs.clear();
    run.monsters.clear();

    let mut start = Platform::new(
        run.player.pos + Vec2::new(-25.0, 50.0),
        PlatformKind::Normal,
    );
    start.id = run.next_entity_id();
    run.platforms.push_back(start);

    let mut frontier = settings.surface_height;
    for _ in 0..settings.initial_platform_count {
        let generated = generate_next(frontier, settings, run.difficulty, rng);
        frontier = generated.platform.pos.y;
        push_generated(run, generated);
    }

    log::debug!(
        "Generated world: {} platforms, {} springs, {} monsters ({})",
        run.platforms.len(),
        run.springs.len(),
        run.monsters.len(),
        run.difficulty.as_str()
    );
}

/// Extend the world by one platform above the current frontier
///
/// An empty world regrows from the bottom of the surface.
pub fn spawn_next(run: &mut RunState, settings: &Settings, rng: &mut impl Rng) {
    let frontier = run
        .frontier()
        .map(|p| p.pos.y)
        .unwrap_or(settings.surface_height);
    let generated = generate_next(frontier, settings, run.difficulty, rng);
    push_generated(run, generated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_world_has_start_platform_under_player() {
        let settings = Settings::default();
        let mut run = RunState::new(&settings, Difficulty::Medium);
        let mut rng = Pcg32::seed_from_u64(7);
        generate_initial(&mut run, &settings, &mut rng);

        assert_eq!(run.platforms.len(), settings.initial_platform_count + 1);
        let start = &run.platforms[0];
        assert_eq!(start.kind, PlatformKind::Normal);
        assert_eq!(start.pos.x, run.player.pos.x - 25.0);
        assert_eq!(start.pos.y, run.player.pos.y + 50.0);
    }

    #[test]
    fn test_platforms_climb_with_bounded_gaps() {
        let settings = Settings::default();
        let mut run = RunState::new(&settings, Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(11);
        generate_initial(&mut run, &settings, &mut rng);

        let mut previous = settings.surface_height;
        for platform in run.platforms.iter().skip(1) {
            let gap = previous - platform.pos.y;
            assert!((99.9..=250.1).contains(&gap), "gap {gap} out of range");
            assert!(platform.pos.x >= 0.0);
            assert!(platform.pos.x + platform.size.x <= settings.surface_width);
            previous = platform.pos.y;
        }
    }

    #[test]
    fn test_easy_never_spawns_monsters() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..5_000 {
            let generated = generate_next(0.0, &settings, Difficulty::Easy, &mut rng);
            assert!(generated.monster.is_none());
        }
    }

    #[test]
    fn test_hard_always_spawns_monsters() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            let generated = generate_next(0.0, &settings, Difficulty::Hard, &mut rng);
            let monster = generated.monster.expect("hard difficulty has probability 1");
            assert!(monster.direction == 1.0 || monster.direction == -1.0);
            assert!((1.0..2.0).contains(&monster.speed));
        }
    }

    #[test]
    fn test_springs_only_on_normal_platforms() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut springs = 0;
        for _ in 0..2_000 {
            let generated = generate_next(0.0, &settings, Difficulty::Easy, &mut rng);
            if let Some(spring) = generated.spring {
                springs += 1;
                assert_eq!(generated.platform.kind, PlatformKind::Normal);
                assert_eq!(spring.pos.y, generated.platform.pos.y - spring.size.y);
            }
        }
        assert!(springs > 0);
    }

    #[test]
    fn test_out_of_range_spring_chance_is_clamped() {
        let settings = Settings {
            spring_chance: 1.5,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(17);
        for _ in 0..500 {
            let generated = generate_next(0.0, &settings, Difficulty::Easy, &mut rng);
            if generated.platform.kind == PlatformKind::Normal {
                assert!(generated.spring.is_some());
            }
        }
    }

    #[test]
    fn test_variant_mix_is_weighted() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let (mut normal, mut spring, mut breaking) = (0, 0, 0);
        for _ in 0..6_000 {
            match generate_next(0.0, &settings, Difficulty::Easy, &mut rng).platform.kind {
                PlatformKind::Normal => normal += 1,
                PlatformKind::Spring => spring += 1,
                PlatformKind::Breaking { .. } => breaking += 1,
            }
        }
        // Expect roughly 4000 / 1000 / 1000
        assert!((3_600..4_400).contains(&normal));
        assert!((800..1_200).contains(&spring));
        assert!((800..1_200).contains(&breaking));
    }

    #[test]
    fn test_spawn_next_extends_from_tail() {
        let settings = Settings::default();
        let mut run = RunState::new(&settings, Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(1);

        spawn_next(&mut run, &settings, &mut rng);
        let first = run.platforms[0].pos.y;
        assert!(first < settings.surface_height);

        spawn_next(&mut run, &settings, &mut rng);
        assert_eq!(run.platforms.len(), 2);
        assert!(run.platforms[1].pos.y < first);
    }
}
