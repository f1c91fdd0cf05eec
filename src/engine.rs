//! Run lifecycle
//!
//! `Engine` owns the current run and is the only thing that mutates it.
//! Hosts feed it intent and commands, drive `tick` from their frame callback
//! and `on_timer` from a 1 Hz clock (or both through `frame`), and read back
//! a borrowed `RunView` plus drained events.
//!
//! Every way a run can end goes through `end_run`, a check-and-set on
//! `is_running`, so end-of-run effects happen once per run no matter which
//! clock notices first.

use std::collections::VecDeque;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{
    Difficulty, EndReason, GameEvent, Intent, Monster, Platform, Player, RunState, Spring,
    generate_initial, tick,
};
use crate::timer::SecondTimer;

/// Where the engine is in the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No run has been started yet
    Idle,
    Running,
    /// Last run is over; its final state stays readable until the next start
    Ended,
}

/// Read-only view of the current run for renderers and HUDs
#[derive(Debug, Clone, Copy)]
pub struct RunView<'a> {
    pub player: &'a Player,
    pub platforms: &'a VecDeque<Platform>,
    pub springs: &'a [Spring],
    pub monsters: &'a [Monster],
    pub score: f32,
    pub high_score: f32,
    pub time_elapsed: u32,
    pub is_running: bool,
    pub difficulty: Difficulty,
}

/// The simulation engine
pub struct Engine<S: HighScoreStore, R: Rng = Pcg32> {
    settings: Settings,
    store: S,
    rng: R,
    high_score: f32,
    /// Applied on the next start
    difficulty: Difficulty,
    /// Latest intent from the input source
    intent: Intent,
    run: Option<RunState>,
    timer: SecondTimer,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Engine<S> {
    /// Engine with a free-running generator
    pub fn new(settings: Settings, store: S) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(settings, store, rng)
    }
}

impl<S: HighScoreStore, R: Rng> Engine<S, R> {
    /// Engine with a caller-supplied generator
    ///
    /// Settings that fail validation are replaced by the defaults. Reads the
    /// stored high score once; a failed read counts as zero.
    pub fn with_rng(settings: Settings, mut store: S, rng: R) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Settings::default()
            }
        };

        let high_score = match store.load_high_score() {
            Ok(score) => score.unwrap_or(0.0),
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {e}");
                0.0
            }
        };

        Self {
            difficulty: settings.difficulty,
            settings,
            store,
            rng,
            high_score,
            intent: Intent::default(),
            run: None,
            timer: SecondTimer::new(),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run, discarding whatever run came before
    pub fn start(&mut self) {
        if self.run.as_ref().is_some_and(|run| run.is_running) {
            log::info!("Restarting while a run is active; previous run discarded");
        }

        let mut run = RunState::new(&self.settings, self.difficulty);
        generate_initial(&mut run, &self.settings, &mut self.rng);
        self.run = Some(run);
        self.timer.start();

        log::info!(
            "Run started ({}, high score {})",
            self.difficulty.as_str(),
            self.high_score.floor()
        );
    }

    /// Same as `start`
    pub fn restart(&mut self) {
        self.start();
    }

    /// Takes effect on the next start; an active run keeps its difficulty
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Latest input intent; read at the start of the next tick
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    pub fn phase(&self) -> RunPhase {
        match &self.run {
            None => RunPhase::Idle,
            Some(run) if run.is_running => RunPhase::Running,
            Some(_) => RunPhase::Ended,
        }
    }

    pub fn high_score(&self) -> f32 {
        self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance the frame simulation by one step
    pub fn tick(&mut self) -> RunPhase {
        let Some(run) = self.run.as_mut() else {
            return RunPhase::Idle;
        };

        let outcome = tick(run, self.intent, &self.settings, &mut self.rng, &mut self.events);
        if let Some(reason) = outcome {
            self.end_run(reason);
        }
        self.phase()
    }

    /// One firing of the 1 Hz run clock
    pub fn on_timer(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if !run.is_running {
            return;
        }

        run.time_elapsed += 1;
        let seconds = run.time_elapsed;
        self.events.push(GameEvent::TimerTick { seconds });

        if self.settings.time_limit.is_some_and(|limit| seconds >= limit) {
            self.end_run(EndReason::TimeUp);
        }
    }

    /// Single-scheduler driver: one tick plus any whole seconds in `dt`
    pub fn frame(&mut self, dt: Duration) -> RunPhase {
        self.tick();
        for _ in 0..self.timer.advance(dt) {
            self.on_timer();
        }
        self.phase()
    }

    /// End the current run
    ///
    /// Returns false when there is nothing to end (idle, or already ended);
    /// in that case nothing is saved or emitted.
    pub fn end_run(&mut self, reason: EndReason) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if !std::mem::replace(&mut run.is_running, false) {
            return false;
        }

        self.timer.stop();
        let score = run.score;
        let final_score = run.display_score();

        if score > self.high_score {
            self.high_score = score;
            if let Err(e) = self.store.save_high_score(score) {
                log::warn!("Could not save high score: {e}");
            }
            self.events.push(GameEvent::NewHighScore { score });
        }

        log::info!("Run ended ({reason:?}) with score {final_score}");
        self.events.push(GameEvent::RunEnded {
            final_score,
            reason,
        });
        true
    }

    /// Borrowed view of the current (or last) run
    pub fn view(&self) -> Option<RunView<'_>> {
        self.run.as_ref().map(|run| RunView {
            player: &run.player,
            platforms: &run.platforms,
            springs: &run.springs,
            monsters: &run.monsters,
            score: run.score,
            high_score: self.high_score,
            time_elapsed: run.time_elapsed,
            is_running: run.is_running,
            difficulty: run.difficulty,
        })
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
