//! Sky Hop entry point
//!
//! Native builds run a headless autopilot session: useful for smoke-testing
//! tuning files and watching the engine's event stream in the log.
//!
//! Usage: `sky-hop [settings.json] [easy|medium|hard]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::Duration;

    use sky_hop::highscores::JsonFileStore;
    use sky_hop::sim::BounceKind;
    use sky_hop::{Difficulty, Engine, GameEvent, HighScoreStore, Intent, RunPhase, RunView, Settings};

    /// Simulated host frame rate
    const FRAME: Duration = Duration::from_micros(16_667);
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Steer toward the nearest platform below the player's feet
    fn autopilot(view: &RunView<'_>) -> Intent {
        let player = view.player;
        let center = player.pos.x + player.size.x / 2.0;
        let feet = player.pos.y + player.size.y;

        let target = view
            .platforms
            .iter()
            .filter(|p| p.pos.y >= feet)
            .min_by(|a, b| {
                (a.pos.y - feet)
                    .partial_cmp(&(b.pos.y - feet))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        match target {
            Some(platform) => {
                let aim = platform.pos.x + platform.size.x / 2.0;
                Intent {
                    left: aim < center - 4.0,
                    right: aim > center + 4.0,
                }
            }
            None => Intent::default(),
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Sky Hop (native) starting...");

        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        let difficulty = args
            .next()
            .and_then(|d| Difficulty::from_str(&d))
            .unwrap_or(settings.difficulty);

        let store = JsonFileStore::new(std::env::temp_dir().join("sky-hop-highscore.json"));
        let mut engine = Engine::new(settings, store);
        engine.set_difficulty(difficulty);
        engine.start();

        let mut bounces = 0u32;
        for _ in 0..MAX_FRAMES {
            let intent = engine.view().map(|view| autopilot(&view)).unwrap_or_default();
            engine.set_intent(intent);

            let phase = engine.frame(FRAME);

            for event in engine.drain_events() {
                match event {
                    GameEvent::Bounce(BounceKind::MonsterPounce) => {
                        bounces += 1;
                        log::info!("Pounced on a monster");
                    }
                    GameEvent::Bounce(kind) => {
                        bounces += 1;
                        log::debug!("Bounce: {kind:?}");
                    }
                    GameEvent::TimerTick { seconds } => log::debug!("Time: {seconds}s"),
                    GameEvent::NewHighScore { score } => log::info!("New high score: {}", score.floor()),
                    GameEvent::RunEnded {
                        final_score,
                        reason,
                    } => {
                        println!("Run ended ({reason:?}): score {final_score}, {bounces} bounces");
                    }
                }
            }

            if phase != RunPhase::Running {
                break;
            }
        }

        if engine.phase() == RunPhase::Running {
            println!("Autopilot still alive after {MAX_FRAMES} frames");
        }

        let mut store = engine.store().clone();
        log::debug!("High score file: {}", store.path().display());
        match store.load_high_score() {
            Ok(Some(best)) => println!("High score: {}", best.floor()),
            Ok(None) => println!("High score: 0"),
            Err(e) => log::warn!("Could not read high score back: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts embed the library directly; there is no binary entry point
}
