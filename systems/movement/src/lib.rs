#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that schedules invader actions along their lanes.

use std::time::Duration;

use garden_defence_core::{latest_tick, Command, Event, InvaderView};

/// Pure system that reacts to ticks and emits invader step commands.
///
/// Invaders act in spawn order, at most once per tick, and only after their
/// move interval has elapsed. Whether a step advances, attacks or breaches is
/// resolved by the world against the lawn as it stands when the command runs.
#[derive(Debug)]
pub struct Movement {
    move_interval: Duration,
}

impl Movement {
    /// Creates a movement system using the provided invader cadence.
    #[must_use]
    pub const fn new(move_interval: Duration) -> Self {
        Self { move_interval }
    }

    /// Consumes world events and the invader view to emit step commands.
    pub fn handle(&mut self, events: &[Event], invaders: &InvaderView, out: &mut Vec<Command>) {
        let Some(now) = latest_tick(events) else {
            return;
        };

        out.extend(
            invaders
                .iter()
                .filter(|invader| now.saturating_sub(invader.last_action) >= self.move_interval)
                .map(|invader| Command::StepInvader {
                    invader: invader.id,
                }),
        );
    }
}
