#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting invader spawn commands.

use std::time::Duration;

use garden_defence_core::{latest_tick, Command, Event, GameConfig, SpawnOrigin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug)]
pub struct Config {
    rows: u32,
    rng_seed: u64,
    tuning: GameConfig,
}

impl Config {
    /// Derives the spawning configuration from match tuning.
    #[must_use]
    pub fn from_game(config: &GameConfig) -> Self {
        Self {
            rows: config.rows,
            rng_seed: config.seed,
            tuning: config.clone(),
        }
    }

    /// Overrides the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }
}

/// State of the auto-spawn timer as recorded by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnClock {
    /// Wave currently in progress.
    pub wave: u32,
    /// Simulation time of the last auto-spawn or wave advance.
    pub last_auto_spawn: Duration,
}

/// System that picks lanes for new invaders.
///
/// Invaders enter at a uniformly random row. The RNG is seeded so a match
/// replays identically for the same seed and command sequence.
#[derive(Debug)]
pub struct Spawning {
    rows: u32,
    tuning: GameConfig,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rows: config.rows,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            tuning: config.tuning,
        }
    }

    /// Emits at most one auto-spawn per tick once the wave's cadence has elapsed.
    pub fn handle(&mut self, events: &[Event], clock: SpawnClock, out: &mut Vec<Command>) {
        let Some(now) = latest_tick(events) else {
            return;
        };

        let interval = self.tuning.auto_spawn_interval(clock.wave);
        if now.saturating_sub(clock.last_auto_spawn) <= interval {
            return;
        }

        if let Some(row) = self.select_row() {
            out.push(Command::SpawnInvader {
                row,
                origin: SpawnOrigin::Auto,
            });
        }
    }

    /// Emits one spawn per wave number, as a burst started by the player.
    pub fn start_wave(&mut self, wave: u32, out: &mut Vec<Command>) {
        for _ in 0..wave {
            if let Some(row) = self.select_row() {
                out.push(Command::SpawnInvader {
                    row,
                    origin: SpawnOrigin::Wave,
                });
            }
        }
    }

    fn select_row(&mut self) -> Option<u32> {
        if self.rows == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..self.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_at(seconds: u64) -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_secs(1),
            now: Duration::from_secs(seconds),
        }]
    }

    #[test]
    fn spawn_requires_strictly_more_than_interval() {
        let mut spawning = Spawning::new(Config::from_game(&GameConfig::default()));
        let clock = SpawnClock {
            wave: 1,
            last_auto_spawn: Duration::ZERO,
        };
        let mut out = Vec::new();

        spawning.handle(&tick_at(14), clock, &mut out);
        assert!(out.is_empty(), "14s is not past the 14s wave-one cadence");

        spawning.handle(&tick_at(15), clock, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn no_tick_means_no_spawn() {
        let mut spawning = Spawning::new(Config::from_game(&GameConfig::default()));
        let mut out = Vec::new();
        spawning.handle(
            &[Event::WaveAdvanced { wave: 2 }],
            SpawnClock {
                wave: 2,
                last_auto_spawn: Duration::ZERO,
            },
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn empty_lawn_never_spawns() {
        let config = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        let mut spawning = Spawning::new(Config::from_game(&config));
        let mut out = Vec::new();
        spawning.start_wave(3, &mut out);
        assert!(out.is_empty());
    }
}
