#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod catalog;
mod config;

pub use catalog::{PlantKind, PlantSpec, Role};
pub use config::{ConfigError, GameConfig};

/// Canonical banner emitted when a new match starts.
pub const WELCOME_BANNER: &str = "Welcome to Garden Defence!";

/// Glyph rendered for grid cells that do not hold a plant.
pub const EMPTY_CELL_GLYPH: &str = "🟩";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a plant of the given kind be placed into a grid cell.
    PlantSeed {
        /// Catalog entry to plant.
        kind: PlantKind,
        /// Target cell of the placement.
        cell: CellCoord,
    },
    /// Manual collection of resources requested by the player.
    CollectResources,
    /// Passive income produced by the economy timer.
    ProduceIncome,
    /// Requests that a new invader enter the far column of a row.
    SpawnInvader {
        /// Row the invader walks along for its whole lifetime.
        row: u32,
        /// Mechanism that requested the spawn.
        origin: SpawnOrigin,
    },
    /// Requests that an invader either advance one column or attack the plant ahead.
    StepInvader {
        /// Identifier of the acting invader.
        invader: InvaderId,
    },
    /// Requests that a shooter fire at the first invader ahead of it in its row.
    FirePlant {
        /// Identifier of the firing plant.
        plant: PlantId,
    },
    /// Requests that the wave number be incremented.
    AdvanceWave,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Simulation clock after the advance.
        now: Duration,
    },
    /// Confirms that a plant was placed and paid for.
    PlantPlaced {
        /// Identifier assigned to the plant by the world.
        plant: PlantId,
        /// Kind of plant that was placed.
        kind: PlantKind,
        /// Cell now holding the plant.
        cell: CellCoord,
        /// Stock remaining after paying for the plant.
        stock: u32,
    },
    /// Reports that a placement request was rejected without mutating state.
    PlantingRejected {
        /// Kind requested for placement.
        kind: PlantKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlantingError,
    },
    /// Confirms that resources were added to the stock.
    ResourcesCollected {
        /// Amount added to the stock.
        amount: u32,
        /// Mechanism that produced the resources.
        source: IncomeSource,
        /// Stock after the addition.
        stock: u32,
    },
    /// Confirms that an invader entered the battlefield.
    InvaderSpawned {
        /// Identifier assigned to the invader.
        invader: InvaderId,
        /// Cell the invader occupies after spawning.
        cell: CellCoord,
        /// Starting health of the invader.
        health: u32,
        /// Mechanism that requested the spawn.
        origin: SpawnOrigin,
    },
    /// Confirms that an invader moved one column toward the defended edge.
    InvaderAdvanced {
        /// Identifier of the invader that moved.
        invader: InvaderId,
        /// Cell occupied before moving.
        from: CellCoord,
        /// Cell occupied after moving.
        to: CellCoord,
    },
    /// Reports that an invader bit the plant in front of it.
    PlantDamaged {
        /// Identifier of the damaged plant.
        plant: PlantId,
        /// Identifier of the attacking invader.
        invader: InvaderId,
        /// Health the plant has left, negative values are clamped to zero.
        remaining: u32,
    },
    /// Reports that a plant lost all of its health and left the grid.
    PlantDestroyed {
        /// Identifier of the destroyed plant.
        plant: PlantId,
        /// Cell the plant occupied.
        cell: CellCoord,
    },
    /// Reports that a shooter hit an invader that survived the shot.
    InvaderDamaged {
        /// Identifier of the damaged invader.
        invader: InvaderId,
        /// Identifier of the firing plant.
        plant: PlantId,
        /// Health the invader has left.
        remaining: u32,
    },
    /// Reports that an invader was defeated and counted as a kill.
    InvaderDefeated {
        /// Identifier of the defeated invader.
        invader: InvaderId,
        /// Identifier of the plant that landed the final shot.
        plant: PlantId,
        /// Cumulative kill count after this kill.
        kills: u32,
    },
    /// Announces that an invader reached the defended edge and the game is over.
    DefenceBreached {
        /// Identifier of the invader that got through.
        invader: InvaderId,
        /// Row the breach happened in.
        row: u32,
    },
    /// Announces that the wave number increased.
    WaveAdvanced {
        /// Wave that became active.
        wave: u32,
    },
}

/// Returns the simulation clock reported by the last tick in `events`, if any.
///
/// Systems act at most once per batch, so only the most recent tick matters.
#[must_use]
pub fn latest_tick(events: &[Event]) -> Option<Duration> {
    events.iter().rev().find_map(|event| match event {
        Event::TimeAdvanced { now, .. } => Some(*now),
        _ => None,
    })
}

/// Mechanism that caused an invader to spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnOrigin {
    /// Periodic spawn driven by the tick loop.
    Auto,
    /// Burst spawn requested by the player starting a wave.
    Wave,
}

/// Mechanism that produced resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeSource {
    /// Periodic income produced on the economy timer.
    Passive,
    /// Collection requested by the player.
    Manual,
}

/// Types of invaders that can walk the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvaderKind {
    /// The only invader variant.
    Basic,
}

impl InvaderKind {
    /// Glyph used when listing invaders.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Basic => "🧟",
        }
    }
}

/// Unique identifier assigned to a plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(u32);

impl PlantId {
    /// Creates a new plant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an invader.
///
/// Identifiers are allocated in spawn order, so sorting by identifier
/// reproduces the order in which invaders entered the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvaderId(u32);

impl InvaderId {
    /// Creates a new invader identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Cell one column closer to the defended edge, if any.
    #[must_use]
    pub const fn ahead(&self) -> Option<CellCoord> {
        if self.column == 0 {
            None
        } else {
            Some(Self::new(self.row, self.column - 1))
        }
    }
}

/// Reasons a planting request may be rejected.
///
/// The `Display` output is the message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum PlantingError {
    /// The requested key does not name a catalog entry.
    #[error("I don't know a plant called `{key}`")]
    UnknownPlant {
        /// Key supplied by the caller.
        key: String,
    },
    /// The stock cannot cover the plant's cost.
    #[error("Not enough sun! Need {required}, but you have {available}")]
    InsufficientResources {
        /// Cost of the requested plant.
        required: u32,
        /// Stock at the time of the request.
        available: u32,
    },
    /// The requested cell lies outside the grid.
    #[error("Invalid position! Rows go from 1 to {rows}, positions from 1 to {columns}")]
    OutOfBounds {
        /// Requested row.
        row: u32,
        /// Requested column.
        column: u32,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// The requested cell already holds a plant.
    #[error("There is already a plant here!")]
    CellOccupied {
        /// Requested row.
        row: u32,
        /// Requested column.
        column: u32,
    },
}

/// Immutable representation of a single invader used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvaderSnapshot {
    /// Unique identifier assigned to the invader.
    pub id: InvaderId,
    /// Variant of the invader.
    pub kind: InvaderKind,
    /// Cell currently occupied by the invader.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Damage dealt per attack.
    pub damage: u32,
    /// Simulation time of the invader's last move or attack.
    pub last_action: Duration,
}

/// Read-only snapshot describing all invaders in spawn order.
#[derive(Clone, Debug, Default)]
pub struct InvaderView {
    snapshots: Vec<InvaderSnapshot>,
}

impl InvaderView {
    /// Creates a new invader view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<InvaderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured invader snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &InvaderSnapshot> {
        self.snapshots.iter()
    }

    /// Number of invaders captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no invaders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<InvaderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single plant used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlantSnapshot {
    /// Identifier allocated to the plant by the world.
    pub id: PlantId,
    /// Catalog entry the plant was created from.
    pub kind: PlantKind,
    /// Cell occupied by the plant.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Simulation time of the plant's placement or last shot.
    pub last_action: Duration,
}

/// Read-only snapshot describing all plants in placement order.
#[derive(Clone, Debug, Default)]
pub struct PlantView {
    snapshots: Vec<PlantSnapshot>,
}

impl PlantView {
    /// Creates a new plant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlantSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured plant snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlantSnapshot> {
        self.snapshots
    }
}

/// Counters describing match progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Current wave number, starting at one.
    pub wave: u32,
    /// Invaders defeated since the match started.
    pub kills: u32,
    /// Indicates whether an invader reached the defended edge.
    pub game_over: bool,
}

/// Everything an adapter needs to render the current state of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Spendable resource stock.
    pub stock: u32,
    /// Current wave number.
    pub wave: u32,
    /// Invaders defeated since the match started.
    pub kills: u32,
    /// Number of invaders currently on the battlefield.
    pub invaders_alive: usize,
    /// Indicates whether the match has ended.
    pub game_over: bool,
    /// Grid rendered one string per row, one glyph per cell.
    pub lawn: Vec<String>,
    /// Invaders in spawn order.
    pub invaders: Vec<InvaderSnapshot>,
    /// Plants in placement order.
    pub plants: Vec<PlantSnapshot>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{latest_tick, CellCoord, Event, PlantingError};

    #[test]
    fn latest_tick_prefers_most_recent_advance() {
        let events = [
            Event::TimeAdvanced {
                dt: Duration::from_secs(1),
                now: Duration::from_secs(1),
            },
            Event::WaveAdvanced { wave: 2 },
            Event::TimeAdvanced {
                dt: Duration::from_secs(1),
                now: Duration::from_secs(2),
            },
        ];
        assert_eq!(latest_tick(&events), Some(Duration::from_secs(2)));
        assert_eq!(latest_tick(&events[1..2]), None);
    }

    #[test]
    fn ahead_steps_toward_defended_edge() {
        assert_eq!(CellCoord::new(1, 3).ahead(), Some(CellCoord::new(1, 2)));
        assert_eq!(CellCoord::new(2, 0).ahead(), None);
    }

    #[test]
    fn insufficient_resources_message_names_both_amounts() {
        let error = PlantingError::InsufficientResources {
            required: 100,
            available: 50,
        };
        let message = error.to_string();
        assert!(message.contains("100"), "{message}");
        assert!(message.contains("50"), "{message}");
    }

    #[test]
    fn out_of_bounds_message_names_valid_ranges() {
        let error = PlantingError::OutOfBounds {
            row: 7,
            column: 0,
            rows: 3,
            columns: 5,
        };
        assert_eq!(
            error.to_string(),
            "Invalid position! Rows go from 1 to 3, positions from 1 to 5"
        );
    }

    #[test]
    fn unknown_plant_message_echoes_key() {
        let error = PlantingError::UnknownPlant {
            key: "кактус".to_owned(),
        };
        assert!(error.to_string().contains("кактус"));
    }
}
