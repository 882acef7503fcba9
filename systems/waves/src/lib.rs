#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty escalation: decides when the next wave begins.

use garden_defence_core::{latest_tick, Command, Event, Progress};

/// Pure system that requests a wave advance after a full clear.
#[derive(Debug)]
pub struct Waves {
    kills_per_wave: u32,
}

impl Waves {
    /// Creates a waves system requiring `kills_per_wave` kills per wave number.
    #[must_use]
    pub const fn new(kills_per_wave: u32) -> Self {
        Self { kills_per_wave }
    }

    /// Emits `Command::AdvanceWave` when no invader is alive and enough were killed.
    ///
    /// Reaching the kill threshold while invaders remain on the lawn is not
    /// enough; the lawn must be clear.
    pub fn handle(
        &mut self,
        events: &[Event],
        progress: Progress,
        invaders_alive: usize,
        out: &mut Vec<Command>,
    ) {
        if latest_tick(events).is_none() || progress.game_over {
            return;
        }

        let threshold = progress.wave.saturating_mul(self.kills_per_wave);
        if invaders_alive == 0 && progress.kills >= threshold {
            out.push(Command::AdvanceWave);
        }
    }
}
