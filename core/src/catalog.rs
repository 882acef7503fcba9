//! Static catalog of plants the player can place on the lawn.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::PlantingError;

/// Types of plants that can be placed on the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlantKind {
    /// Producer that feeds the economy.
    Sunflower,
    /// Shooter that damages invaders ahead of it in its row.
    Peashooter,
    /// Passive wall with a large health pool.
    WallNut,
    /// Single-use bomb; its damage is declared but never triggered.
    CherryBomb,
}

/// Combat or economy behaviour attached to a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Produces resources.
    Producer {
        /// Amount produced per cycle.
        production: u32,
    },
    /// Fires at invaders ahead of it in the same row.
    Shooter {
        /// Damage dealt per shot.
        damage: u32,
        /// Minimum simulated time between two shots.
        cooldown: Duration,
    },
    /// Absorbs invader attacks.
    Wall,
    /// Area damage on detonation.
    Bomb {
        /// Damage dealt on detonation.
        damage: u32,
    },
}

/// Immutable catalog entry describing a plant kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlantSpec {
    /// Catalog key used by commands.
    pub key: &'static str,
    /// Display name shown to the player.
    pub name: &'static str,
    /// Glyph rendered in the grid.
    pub icon: &'static str,
    /// Stock consumed on placement.
    pub cost: u32,
    /// Health the plant starts with.
    pub health: u32,
    /// Role-specific parameters.
    pub role: Role,
}

impl PlantKind {
    /// Every catalog entry in display order.
    pub const ALL: [PlantKind; 4] = [
        Self::Sunflower,
        Self::Peashooter,
        Self::WallNut,
        Self::CherryBomb,
    ];

    /// Returns the catalog entry for this kind.
    #[must_use]
    pub const fn spec(self) -> PlantSpec {
        match self {
            Self::Sunflower => PlantSpec {
                key: "подсолнух",
                name: "Подсолнух",
                icon: "🌻",
                cost: 50,
                health: 100,
                role: Role::Producer { production: 25 },
            },
            Self::Peashooter => PlantSpec {
                key: "горох",
                name: "Стреляющий горох",
                icon: "🌱",
                cost: 100,
                health: 150,
                role: Role::Shooter {
                    damage: 25,
                    cooldown: Duration::from_millis(3_000),
                },
            },
            Self::WallNut => PlantSpec {
                key: "орех",
                name: "Орех",
                icon: "🥜",
                cost: 50,
                health: 400,
                role: Role::Wall,
            },
            Self::CherryBomb => PlantSpec {
                key: "вишня",
                name: "Вишня-бомба",
                icon: "💣",
                cost: 150,
                health: 100,
                role: Role::Bomb { damage: 200 },
            },
        }
    }

    /// Resolves a catalog key into a plant kind.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.spec().key == key)
    }

    /// Resolves a catalog key into its full entry, reporting unknown keys.
    pub fn lookup(key: &str) -> Result<PlantSpec, PlantingError> {
        Self::from_key(key)
            .map(Self::spec)
            .ok_or_else(|| PlantingError::UnknownPlant {
                key: key.to_owned(),
            })
    }

    /// Stock consumed on placement.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.spec().cost
    }

    /// Glyph rendered in the grid.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        self.spec().icon
    }

    /// Shooter parameters, if the kind fires at invaders.
    #[must_use]
    pub const fn shooter(self) -> Option<(u32, Duration)> {
        match self.spec().role {
            Role::Shooter { damage, cooldown } => Some((damage, cooldown)),
            _ => None,
        }
    }
}
