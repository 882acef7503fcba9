#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Defence.

mod economy;
mod grid;

use std::time::Duration;

use garden_defence_core::{
    CellCoord, Command, Event, GameConfig, IncomeSource, InvaderId, InvaderKind, PlantId,
    PlantKind, SpawnOrigin,
};
use tracing::{debug, info, warn};

use crate::{economy::Stock, grid::Lawn};

/// Represents the authoritative state of a single match.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    lawn: Lawn,
    invaders: Vec<Invader>,
    stock: Stock,
    wave: u32,
    kills: u32,
    game_over: bool,
    clock: Duration,
    last_auto_spawn: Duration,
    last_income: Duration,
    next_invader_id: u32,
}

impl World {
    /// Creates a fresh, active match using the provided tuning.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            lawn: Lawn::new(config.rows, config.columns),
            invaders: Vec::new(),
            stock: Stock::new(config.starting_stock),
            wave: 1,
            kills: 0,
            game_over: false,
            clock: Duration::ZERO,
            last_auto_spawn: Duration::ZERO,
            last_income: Duration::ZERO,
            next_invader_id: 0,
            config,
        }
    }

    fn invader_index(&self, invader: InvaderId) -> Option<usize> {
        self.invaders.iter().position(|entry| entry.id == invader)
    }

    fn plant_seed(&mut self, kind: PlantKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let cost = kind.cost();
        let placed = self
            .lawn
            .ensure_vacant(cell)
            .and_then(|()| self.stock.ensure_affordable(cost))
            .and_then(|()| self.lawn.place(kind, cell, self.clock));

        match placed {
            Ok(plant) => {
                let stock = self.stock.withdraw(cost);
                debug!(
                    plant = plant.get(),
                    ?kind,
                    row = cell.row(),
                    column = cell.column(),
                    stock,
                    "plant placed"
                );
                out_events.push(Event::PlantPlaced {
                    plant,
                    kind,
                    cell,
                    stock,
                });
            }
            Err(reason) => {
                debug!(?kind, %reason, "planting rejected");
                out_events.push(Event::PlantingRejected { kind, cell, reason });
            }
        }
    }

    fn spawn_invader(&mut self, row: u32, origin: SpawnOrigin, out_events: &mut Vec<Event>) {
        let (rows, columns) = self.lawn.dimensions();
        if row >= rows {
            warn!(row, rows, "ignoring spawn outside the lawn");
            return;
        }

        let id = InvaderId::new(self.next_invader_id);
        self.next_invader_id = self.next_invader_id.saturating_add(1);
        let cell = CellCoord::new(row, columns.saturating_sub(1));
        let health = self.config.invader_health(self.wave);
        self.invaders.push(Invader {
            id,
            kind: InvaderKind::Basic,
            cell,
            health,
            damage: self.config.invader_damage,
            last_action: self.clock,
        });
        if origin == SpawnOrigin::Auto {
            self.last_auto_spawn = self.clock;
        }

        debug!(invader = id.get(), row, health, ?origin, "invader spawned");
        out_events.push(Event::InvaderSpawned {
            invader: id,
            cell,
            health,
            origin,
        });
    }

    fn step_invader(&mut self, invader: InvaderId, out_events: &mut Vec<Event>) {
        let Some(index) = self.invader_index(invader) else {
            return;
        };
        let now = self.clock;
        let move_interval = self.config.invader_move_interval();
        let entry = &mut self.invaders[index];
        if now.saturating_sub(entry.last_action) < move_interval {
            return;
        }
        entry.last_action = now;

        let from = entry.cell;
        match from.ahead() {
            Some(ahead) => {
                if let Some(plant) = self.lawn.plant_at_mut(ahead) {
                    plant.health = plant.health.saturating_sub(entry.damage);
                    let (plant_id, remaining) = (plant.id, plant.health);
                    out_events.push(Event::PlantDamaged {
                        plant: plant_id,
                        invader,
                        remaining,
                    });
                    if remaining == 0 && self.lawn.remove(ahead).is_some() {
                        debug!(
                            plant = plant_id.get(),
                            row = ahead.row(),
                            column = ahead.column(),
                            "plant destroyed"
                        );
                        out_events.push(Event::PlantDestroyed {
                            plant: plant_id,
                            cell: ahead,
                        });
                    }
                } else {
                    entry.cell = ahead;
                    out_events.push(Event::InvaderAdvanced {
                        invader,
                        from,
                        to: ahead,
                    });
                }
            }
            None => {
                if !self.game_over {
                    info!(
                        invader = invader.get(),
                        row = from.row(),
                        "defence breached, game over"
                    );
                }
                self.game_over = true;
                out_events.push(Event::DefenceBreached {
                    invader,
                    row: from.row(),
                });
            }
        }
    }

    fn fire_plant(&mut self, plant: PlantId, out_events: &mut Vec<Event>) {
        let now = self.clock;
        let Some(shooter) = self.lawn.plant_mut(plant) else {
            return;
        };
        let Some((damage, cooldown)) = shooter.kind.shooter() else {
            return;
        };
        if now.saturating_sub(shooter.last_action) < cooldown {
            return;
        }

        let cell = shooter.cell;
        let Some(index) = self.invaders.iter().position(|invader| {
            invader.cell.row() == cell.row() && invader.cell.column() > cell.column()
        }) else {
            return;
        };
        shooter.last_action = now;

        let target = &mut self.invaders[index];
        target.health = target.health.saturating_sub(damage);
        let invader = target.id;
        if target.health == 0 {
            let _ = self.invaders.remove(index);
            self.kills = self.kills.saturating_add(1);
            debug!(invader = invader.get(), kills = self.kills, "invader defeated");
            out_events.push(Event::InvaderDefeated {
                invader,
                plant,
                kills: self.kills,
            });
        } else {
            out_events.push(Event::InvaderDamaged {
                invader,
                plant,
                remaining: target.health,
            });
        }
    }

    fn advance_wave(&mut self, out_events: &mut Vec<Event>) {
        if !self.invaders.is_empty() || self.kills < self.config.kill_threshold(self.wave) {
            return;
        }

        self.wave = self.wave.saturating_add(1);
        self.last_auto_spawn = self.clock;
        info!(wave = self.wave, kills = self.kills, "wave advanced");
        out_events.push(Event::WaveAdvanced { wave: self.wave });
    }

    fn add_income(&mut self, source: IncomeSource, out_events: &mut Vec<Event>) {
        let amount = self.config.income_amount;
        let stock = self.stock.deposit(amount);
        if source == IncomeSource::Passive {
            self.last_income = self.clock;
        }
        out_events.push(Event::ResourcesCollected {
            amount,
            source,
            stock,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Rejected or stale commands never panic: placements report a
/// [`Event::PlantingRejected`], while combat commands whose cooldown has not
/// elapsed or whose actor no longer exists are dropped silently.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced {
                dt,
                now: world.clock,
            });
        }
        Command::PlantSeed { kind, cell } => world.plant_seed(kind, cell, out_events),
        Command::CollectResources => world.add_income(IncomeSource::Manual, out_events),
        Command::ProduceIncome => world.add_income(IncomeSource::Passive, out_events),
        Command::SpawnInvader { row, origin } => world.spawn_invader(row, origin, out_events),
        Command::StepInvader { invader } => world.step_invader(invader, out_events),
        Command::FirePlant { plant } => world.fire_plant(plant, out_events),
        Command::AdvanceWave => world.advance_wave(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use garden_defence_core::{
        CellCoord, GameConfig, GameSnapshot, InvaderSnapshot, InvaderView, PlantSnapshot,
        PlantView, PlantingError, Progress,
    };

    /// Tuning the match was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Lawn dimensions as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.lawn.dimensions()
    }

    /// Current spendable stock.
    #[must_use]
    pub fn stock(world: &World) -> u32 {
        world.stock.get()
    }

    /// Wave, kill and game-over counters.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        Progress {
            wave: world.wave,
            kills: world.kills,
            game_over: world.game_over,
        }
    }

    /// Reports whether an invader has reached the defended edge.
    #[must_use]
    pub fn is_over(world: &World) -> bool {
        world.game_over
    }

    /// Simulation time elapsed since the match started.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Simulation time of the last auto-spawn or wave advance.
    #[must_use]
    pub fn last_auto_spawn(world: &World) -> Duration {
        world.last_auto_spawn
    }

    /// Simulation time of the last passive income.
    #[must_use]
    pub fn last_income(world: &World) -> Duration {
        world.last_income
    }

    /// Reports whether a cell is free, failing for cells outside the lawn.
    pub fn is_empty(world: &World, cell: CellCoord) -> Result<bool, PlantingError> {
        world.lawn.is_empty(cell)
    }

    /// Captures the plant occupying a cell, if any.
    #[must_use]
    pub fn plant_at(world: &World, cell: CellCoord) -> Option<PlantSnapshot> {
        world.lawn.plant_at(cell).map(|plant| PlantSnapshot {
            id: plant.id,
            kind: plant.kind,
            cell: plant.cell,
            health: plant.health,
            last_action: plant.last_action,
        })
    }

    /// Captures a read-only view of the plants in placement order.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        PlantView::from_snapshots(
            world
                .lawn
                .plants()
                .iter()
                .map(|plant| PlantSnapshot {
                    id: plant.id,
                    kind: plant.kind,
                    cell: plant.cell,
                    health: plant.health,
                    last_action: plant.last_action,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the invaders in spawn order.
    #[must_use]
    pub fn invader_view(world: &World) -> InvaderView {
        InvaderView::from_snapshots(
            world
                .invaders
                .iter()
                .map(|invader| InvaderSnapshot {
                    id: invader.id,
                    kind: invader.kind,
                    cell: invader.cell,
                    health: invader.health,
                    damage: invader.damage,
                    last_action: invader.last_action,
                })
                .collect(),
        )
    }

    /// Renders the lawn one string per row.
    #[must_use]
    pub fn lawn_rows(world: &World) -> Vec<String> {
        world.lawn.render_rows()
    }

    /// Reports whether the cell matrix and the plant list agree.
    #[must_use]
    pub fn lawn_is_consistent(world: &World) -> bool {
        world.lawn.is_consistent()
    }

    /// Captures everything an adapter needs to render the match.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        let invaders = invader_view(world).into_vec();
        GameSnapshot {
            stock: world.stock.get(),
            wave: world.wave,
            kills: world.kills,
            invaders_alive: invaders.len(),
            game_over: world.game_over,
            lawn: lawn_rows(world),
            invaders,
            plants: plant_view(world).into_vec(),
        }
    }
}

#[derive(Clone, Debug)]
struct Invader {
    id: InvaderId,
    kind: InvaderKind,
    cell: CellCoord,
    health: u32,
    damage: u32,
    last_action: Duration,
}
