//! Single-threaded match engine: one world plus the systems that drive it.

use std::time::Duration;

use garden_defence_core::{
    CellCoord, Command, ConfigError, Event, GameConfig, GameSnapshot, PlantId, PlantKind,
    PlantingError,
};
use garden_defence_system_movement::Movement;
use garden_defence_system_plant_combat::PlantCombat;
use garden_defence_system_spawning::{Config as SpawningConfig, SpawnClock, Spawning};
use garden_defence_system_waves::Waves;
use garden_defence_world::{self as world, query, World};
use serde::Serialize;
use tracing::info;

/// Answer to a player command, phrased for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Indicates whether the command changed the match.
    pub success: bool,
    /// Human-readable description of what happened.
    pub message: String,
}

impl CommandOutcome {
    fn succeeded(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Details of an accepted placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlantReceipt {
    /// Identifier the world assigned to the plant.
    pub plant: PlantId,
    /// Kind that was planted.
    pub kind: PlantKind,
    /// Cell now holding the plant.
    pub cell: CellCoord,
    /// Stock left after paying for it.
    pub stock: u32,
}

/// A running match: the authoritative world and the systems reacting to it.
///
/// All operations complete synchronously. Nothing here reads a wall clock;
/// time only moves through [`Match::tick`] and [`Match::tick_by`].
#[derive(Debug)]
pub struct Match {
    world: World,
    spawning: Spawning,
    movement: Movement,
    plant_combat: PlantCombat,
    waves: Waves,
}

impl Match {
    /// Starts a fresh, active match.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            rows = config.rows,
            columns = config.columns,
            seed = config.seed,
            "match created"
        );
        Ok(Self::assemble(config))
    }

    fn assemble(config: GameConfig) -> Self {
        Self {
            spawning: Spawning::new(SpawningConfig::from_game(&config)),
            movement: Movement::new(config.invader_move_interval()),
            plant_combat: PlantCombat::new(),
            waves: Waves::new(config.kills_per_wave),
            world: World::new(config),
        }
    }

    /// Throws the current state away and starts over with the same tuning.
    pub fn reset(&mut self) {
        let config = self.config().clone();
        *self = Self::assemble(config);
        info!("match reset");
    }

    /// Tuning the match runs with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        query::config(&self.world)
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies one command outside the tick pipeline and returns its events.
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    /// Plants `key` at the zero-based `row` and `column`.
    pub fn plant_checked(
        &mut self,
        key: &str,
        row: u32,
        column: u32,
    ) -> Result<PlantReceipt, PlantingError> {
        let kind = PlantKind::from_key(key).ok_or_else(|| PlantingError::UnknownPlant {
            key: key.trim().to_owned(),
        })?;
        let cell = CellCoord::new(row, column);

        // `apply` answers every placement with exactly one of these two events.
        self.apply(Command::PlantSeed { kind, cell })
            .into_iter()
            .find_map(|event| match event {
                Event::PlantPlaced {
                    plant,
                    kind,
                    cell,
                    stock,
                } => Some(Ok(PlantReceipt {
                    plant,
                    kind,
                    cell,
                    stock,
                })),
                Event::PlantingRejected { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(PlantingError::CellOccupied { row, column }))
    }

    /// Plants `key` at the zero-based `row` and `column`, describing the result.
    pub fn plant(&mut self, key: &str, row: u32, column: u32) -> CommandOutcome {
        match self.plant_checked(key, row, column) {
            Ok(receipt) => {
                let spec = receipt.kind.spec();
                CommandOutcome::succeeded(format!(
                    "{} {} planted in row {}, position {}!",
                    spec.icon,
                    spec.name,
                    row.saturating_add(1),
                    column.saturating_add(1)
                ))
            }
            Err(error) => CommandOutcome::failed(error.to_string()),
        }
    }

    /// Adds one income portion on demand and returns the amount collected.
    pub fn collect_resources(&mut self) -> u32 {
        let _ = self.apply(Command::CollectResources);
        self.config().income_amount
    }

    /// Adds the periodic income portion and returns the new stock.
    ///
    /// Income keeps flowing after the defence has fallen.
    pub fn produce_income(&mut self) -> u32 {
        let _ = self.apply(Command::ProduceIncome);
        query::stock(&self.world)
    }

    /// Releases one invader per wave number at once.
    pub fn start_wave(&mut self) -> CommandOutcome {
        if self.is_over() {
            return CommandOutcome::failed(
                "The garden has fallen. Reset to start a new game.".to_owned(),
            );
        }

        let wave = query::progress(&self.world).wave;
        let mut commands = Vec::new();
        self.spawning.start_wave(wave, &mut commands);
        let mut events = Vec::new();
        self.flush(&mut commands, &mut events);
        let spawned = events
            .iter()
            .filter(|event| matches!(event, Event::InvaderSpawned { .. }))
            .count();

        info!(wave, spawned, "wave started");
        CommandOutcome::succeeded(format!(
            "Wave {wave} has begun! {spawned} invaders appeared!"
        ))
    }

    /// Captures the state for display without touching it.
    #[must_use]
    pub fn state(&self) -> GameSnapshot {
        query::snapshot(&self.world)
    }

    /// Reports whether an invader has broken through.
    #[must_use]
    pub fn is_over(&self) -> bool {
        query::is_over(&self.world)
    }

    /// Runs one combat tick of the configured length.
    pub fn tick(&mut self) -> Vec<Event> {
        let dt = self.config().tick_interval();
        self.tick_by(dt)
    }

    /// Runs one combat tick that advances the simulation clock by `dt`.
    ///
    /// Systems run in a fixed order: spawning, movement, plant combat, waves.
    /// Each system's commands are applied before the next one looks at the
    /// world. Once the match is over the tick does nothing at all.
    pub fn tick_by(&mut self, dt: Duration) -> Vec<Event> {
        if self.is_over() {
            return Vec::new();
        }

        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        let tick = events.clone();
        let mut commands = Vec::new();

        let clock = SpawnClock {
            wave: query::progress(&self.world).wave,
            last_auto_spawn: query::last_auto_spawn(&self.world),
        };
        self.spawning.handle(&tick, clock, &mut commands);
        self.flush(&mut commands, &mut events);

        let invaders = query::invader_view(&self.world);
        self.movement.handle(&tick, &invaders, &mut commands);
        self.flush(&mut commands, &mut events);

        let plants = query::plant_view(&self.world);
        let invaders = query::invader_view(&self.world);
        self.plant_combat
            .handle(&tick, &plants, &invaders, &mut commands);
        self.flush(&mut commands, &mut events);

        let alive = query::invader_view(&self.world).len();
        self.waves
            .handle(&tick, query::progress(&self.world), alive, &mut commands);
        self.flush(&mut commands, &mut events);

        events
    }

    fn flush(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}
