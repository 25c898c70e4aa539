//! Simulation parameters and configuration.
//!
//! [`Configuration`] is the serializable description of a run. It can be
//! written to and loaded from JSON so a setup can be reproduced exactly
//! (given a seed).

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base::POPULATION_FLOOR;
use crate::errors::{ConfigError, ParameterError};
use crate::evolution::{DriftModel, MortalityModel, MutationModel, ReproductionModel};

/// Default tick period of the interactive clock.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Sickle start percentage used by `reset`.
pub const RESET_SICKLE_START_PERCENT: u32 = 30;

/// The master configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub execution: ExecutionConfig,
    pub evolution: EvolutionConfig,
    pub initialization: InitializationConfig,
}

/// High-level run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of founders
    pub population_size: usize,
    /// Ticks to run in batch mode
    pub total_generations: usize,
    /// Optional RNG seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
    /// Clock period in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Removals below this size are refused
    #[serde(default = "default_floor")]
    pub population_floor: usize,
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_floor() -> usize {
    POPULATION_FLOOR
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            total_generations: 1000,
            seed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            population_floor: POPULATION_FLOOR,
        }
    }
}

/// Conditions that modulate mortality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Whether SS individuals receive care
    pub healthcare_available: bool,
    /// Reported only; no stage reads it
    pub malaria_region: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            healthcare_available: true,
            malaria_region: true,
        }
    }
}

/// Grouped evolutionary parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    #[serde(default)]
    pub mutation: MutationModel,
    #[serde(default)]
    pub reproduction: ReproductionModel,
    /// Whether the reproduction stage runs at all
    #[serde(default)]
    pub allow_growth: bool,
    #[serde(default)]
    pub mortality: MortalityModel,
    /// Drift stage, disabled when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift: Option<DriftModel>,
    #[serde(default)]
    pub environment: Environment,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation: MutationModel::default(),
            reproduction: ReproductionModel::default(),
            allow_growth: false,
            mortality: MortalityModel::default(),
            drift: None,
            environment: Environment::default(),
        }
    }
}

/// Founder generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializationConfig {
    /// Share of founders carrying at least one S allele, 0 to 100
    pub sickle_start_percent: u32,
}

impl Default for InitializationConfig {
    fn default() -> Self {
        Self {
            sickle_start_percent: RESET_SICKLE_START_PERCENT,
        }
    }
}

impl Configuration {
    /// Check every parameter range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let exec = &self.execution;
        if exec.population_size < exec.population_floor {
            return Err(ParameterError::InvalidCount {
                name: "population_size",
                value: exec.population_size,
                reason: "must be at least the population floor",
            });
        }
        if self.initialization.sickle_start_percent > 100 {
            return Err(ParameterError::InvalidPercentage(
                "sickle_start_percent",
                self.initialization.sickle_start_percent,
            ));
        }
        self.evolution.mutation.validate()?;
        self.evolution.reproduction.validate()?;
        self.evolution.mortality.validate()?;
        if let Some(drift) = &self.evolution.drift {
            drift.validate()?;
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Named parameter sets for real-world settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionPreset {
    WestAfrica,
    UnitedStates,
    Europe,
    Custom,
}

impl RegionPreset {
    pub const ALL: [RegionPreset; 4] = [
        RegionPreset::WestAfrica,
        RegionPreset::UnitedStates,
        RegionPreset::Europe,
        RegionPreset::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RegionPreset::WestAfrica => "west-africa",
            RegionPreset::UnitedStates => "united-states",
            RegionPreset::Europe => "europe",
            RegionPreset::Custom => "custom",
        }
    }

    /// `(sickle_start_percent, mutation_rate, healthcare, malaria)`, or
    /// `None` for [`RegionPreset::Custom`].
    pub fn parameters(&self) -> Option<(u32, f64, bool, bool)> {
        match self {
            RegionPreset::WestAfrica => Some((10, 0.001, false, true)),
            RegionPreset::UnitedStates => Some((1, 0.0005, true, false)),
            RegionPreset::Europe => Some((0, 0.0001, true, false)),
            RegionPreset::Custom => None,
        }
    }

    /// Overwrite the preset's fields in `config`, leaving the rest alone.
    pub fn apply(&self, config: &mut Configuration) {
        let Some((percent, mutation_rate, healthcare, malaria)) = self.parameters() else {
            return;
        };
        config.initialization.sickle_start_percent = percent;
        config.evolution.mutation = MutationModel::new(mutation_rate).unwrap_or_default();
        config.evolution.environment = Environment {
            healthcare_available: healthcare,
            malaria_region: malaria,
        };
    }
}

impl fmt::Display for RegionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegionPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        RegionPreset::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| {
                format!("Unknown region '{s}' (expected west-africa, united-states, europe or custom)")
            })
    }
}
