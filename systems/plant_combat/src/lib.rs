#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits firing commands for shooters whose cooldown elapsed.

use garden_defence_core::{latest_tick, Command, Event, InvaderView, PlantView};

/// Plant combat system that queues firing commands for ready shooters.
#[derive(Debug, Default)]
pub struct PlantCombat {
    scratch: Vec<Command>,
}

impl PlantCombat {
    /// Creates a new plant combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FirePlant` entries for shooters that are ready and see a target.
    ///
    /// A shooter with no invader ahead of it in its row keeps its charge; the
    /// world picks the actual target when the command is applied.
    pub fn handle(
        &mut self,
        events: &[Event],
        plants: &PlantView,
        invaders: &InvaderView,
        out: &mut Vec<Command>,
    ) {
        let Some(now) = latest_tick(events) else {
            return;
        };

        if invaders.is_empty() {
            return;
        }

        self.scratch.clear();

        for plant in plants.iter() {
            let Some((_, cooldown)) = plant.kind.shooter() else {
                continue;
            };
            if now.saturating_sub(plant.last_action) < cooldown {
                continue;
            }
            let has_target = invaders.iter().any(|invader| {
                invader.cell.row() == plant.cell.row()
                    && invader.cell.column() > plant.cell.column()
            });
            if has_target {
                self.scratch.push(Command::FirePlant { plant: plant.id });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
