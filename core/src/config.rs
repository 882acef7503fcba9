//! Process-wide tuning constants for a match.

use std::time::Duration;

use serde::Deserialize;

/// Reasons a [`GameConfig`] may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The lawn must hold at least one cell.
    #[error("lawn dimensions must be at least 1x1, got {rows}x{columns}")]
    EmptyLawn {
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        columns: u32,
    },
    /// A timer cadence was configured as zero.
    #[error("`{field}` must be greater than zero")]
    ZeroInterval {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Tuning constants fixed for the lifetime of a match.
///
/// Durations are expressed in milliseconds so the structure reads naturally
/// from TOML. Missing fields fall back to [`GameConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of lanes on the lawn.
    pub rows: u32,
    /// Number of cells per lane.
    pub columns: u32,
    /// Stock available when a match starts.
    pub starting_stock: u32,
    /// Amount added by passive income and by manual collection.
    pub income_amount: u32,
    /// Cadence of passive income.
    pub income_interval_ms: u64,
    /// Cadence of the combat tick.
    pub tick_interval_ms: u64,
    /// Health of a wave-zero invader.
    pub invader_base_health: u32,
    /// Health added to spawned invaders per wave.
    pub invader_health_per_wave: u32,
    /// Damage an invader deals per attack.
    pub invader_damage: u32,
    /// Minimum simulated time between two invader actions.
    pub invader_move_interval_ms: u64,
    /// Auto-spawn cadence before wave scaling.
    pub auto_spawn_base_ms: u64,
    /// Auto-spawn cadence shaved off per wave.
    pub auto_spawn_step_ms: u64,
    /// Lower clamp for the auto-spawn cadence.
    pub auto_spawn_floor_ms: u64,
    /// Kills required per wave number before the wave may advance.
    pub kills_per_wave: u32,
    /// Seed for the row-selection RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 5,
            starting_stock: 50,
            income_amount: 25,
            income_interval_ms: 10_000,
            tick_interval_ms: 1_000,
            invader_base_health: 100,
            invader_health_per_wave: 20,
            invader_damage: 10,
            invader_move_interval_ms: 2_000,
            auto_spawn_base_ms: 15_000,
            auto_spawn_step_ms: 1_000,
            auto_spawn_floor_ms: 2_000,
            kills_per_wave: 3,
            seed: 0x5eed_9a7d_e11c_e000,
        }
    }
}

impl GameConfig {
    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyLawn {
                rows: self.rows,
                columns: self.columns,
            });
        }
        for (field, value) in [
            ("tick_interval_ms", self.tick_interval_ms),
            ("income_interval_ms", self.income_interval_ms),
            ("auto_spawn_floor_ms", self.auto_spawn_floor_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { field });
            }
        }
        Ok(())
    }

    /// Cadence of the combat tick.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Cadence of passive income.
    #[must_use]
    pub const fn income_interval(&self) -> Duration {
        Duration::from_millis(self.income_interval_ms)
    }

    /// Minimum simulated time between two invader actions.
    #[must_use]
    pub const fn invader_move_interval(&self) -> Duration {
        Duration::from_millis(self.invader_move_interval_ms)
    }

    /// Health of invaders spawned during the given wave.
    #[must_use]
    pub const fn invader_health(&self, wave: u32) -> u32 {
        self.invader_base_health
            .saturating_add(wave.saturating_mul(self.invader_health_per_wave))
    }

    /// Auto-spawn cadence for the given wave, never below the configured floor.
    #[must_use]
    pub fn auto_spawn_interval(&self, wave: u32) -> Duration {
        let shaved = self
            .auto_spawn_base_ms
            .saturating_sub(u64::from(wave).saturating_mul(self.auto_spawn_step_ms));
        Duration::from_millis(shaved.max(self.auto_spawn_floor_ms))
    }

    /// Kills required before the given wave may advance.
    #[must_use]
    pub const fn kill_threshold(&self, wave: u32) -> u32 {
        wave.saturating_mul(self.kills_per_wave)
    }
}
