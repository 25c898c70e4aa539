//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and validation deferred to [`SimulationBuilder::build`].

pub use crate::errors::BuilderError;
use crate::evolution::{
    DriftModel, MatingBias, MortalityModel, MutationModel, RemovalPolicy, ReproductionModel,
};
use crate::simulation::{Configuration, Environment, RegionPreset, Simulation};

/// Builder for constructing Simulation instances with a fluent API.
///
/// # Examples
///
/// ```
/// use sickle_sim::simulation::{RegionPreset, SimulationBuilder};
///
/// // Simple simulation with defaults
/// let sim = SimulationBuilder::new()
///     .population_size(100)
///     .generations(50)
///     .build()
///     .unwrap();
///
/// // A growing West African population
/// let sim = SimulationBuilder::new()
///     .population_size(500)
///     .generations(200)
///     .region(RegionPreset::WestAfrica)
///     .allow_growth(true)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    // Required parameters
    population_size: Option<usize>,
    generations: Option<usize>,

    seed: Option<u64>,                // Default: None (random)
    tick_interval_ms: u64,            // Default: 100
    population_floor: usize,          // Default: 10
    sickle_start_percent: u32,        // Default: 30

    mutation_rate: f64,               // Default: 0.005
    reproduction_rate: f64,           // Default: 0.02
    max_births_per_tick: usize,       // Default: 5
    mating_bias: Option<MatingBias>,  // Default: None
    allow_growth: bool,               // Default: false
    death_rate: f64,                  // Default: 0.01
    death_cap_fraction: f64,          // Default: 0.1
    removal: RemovalPolicy,           // Default: UpToCap
    drift: Option<DriftModel>,        // Default: None (disabled)
    environment: Environment,         // Default: healthcare + malaria
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::from_configuration(&Configuration::default()).without_required()
    }

    /// Start from an existing configuration, required fields included.
    pub fn from_configuration(config: &Configuration) -> Self {
        let evo = &config.evolution;
        Self {
            population_size: Some(config.execution.population_size),
            generations: Some(config.execution.total_generations),
            seed: config.execution.seed,
            tick_interval_ms: config.execution.tick_interval_ms,
            population_floor: config.execution.population_floor,
            sickle_start_percent: config.initialization.sickle_start_percent,
            mutation_rate: evo.mutation.rate(),
            reproduction_rate: evo.reproduction.rate(),
            max_births_per_tick: evo.reproduction.max_births_per_tick(),
            mating_bias: evo.reproduction.mating_bias().copied(),
            allow_growth: evo.allow_growth,
            death_rate: evo.mortality.death_rate(),
            death_cap_fraction: evo.mortality.cap_fraction(),
            removal: evo.mortality.removal(),
            drift: evo.drift,
            environment: evo.environment,
        }
    }

    fn without_required(mut self) -> Self {
        self.population_size = None;
        self.generations = None;
        self
    }

    /// Set the founder population size (required).
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the number of generations to run (required).
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Set the random seed for reproducibility (default: None = random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Smallest size removals may shrink the population to (default: 10).
    pub fn population_floor(mut self, floor: usize) -> Self {
        self.population_floor = floor;
        self
    }

    /// Share of founders carrying an S allele, 0 to 100 (default: 30).
    pub fn sickle_start_percent(mut self, percent: u32) -> Self {
        self.sickle_start_percent = percent;
        self
    }

    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn reproduction_rate(mut self, rate: f64) -> Self {
        self.reproduction_rate = rate;
        self
    }

    pub fn max_births_per_tick(mut self, max: usize) -> Self {
        self.max_births_per_tick = max;
        self
    }

    /// Bias parent selection against SS individuals.
    pub fn mating_bias(mut self, bias: MatingBias) -> Self {
        self.mating_bias = Some(bias);
        self
    }

    pub fn allow_growth(mut self, allow: bool) -> Self {
        self.allow_growth = allow;
        self
    }

    pub fn death_rate(mut self, rate: f64) -> Self {
        self.death_rate = rate;
        self
    }

    pub fn death_cap_fraction(mut self, fraction: f64) -> Self {
        self.death_cap_fraction = fraction;
        self
    }

    /// Removal policy for both mortality and drift (default: up to cap).
    pub fn removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal = policy;
        if let Some(drift) = self.drift.as_mut() {
            *drift = DriftModel::new(drift.cap_fraction(), policy).unwrap_or(*drift);
        }
        self
    }

    /// Enable or disable the drift stage with default parameters.
    pub fn drift(mut self, enabled: bool) -> Self {
        self.drift = if enabled {
            let cap_fraction = DriftModel::default().cap_fraction();
            Some(DriftModel::new(cap_fraction, self.removal).unwrap_or_default())
        } else {
            None
        };
        self
    }

    pub fn drift_model(mut self, drift: DriftModel) -> Self {
        self.drift = Some(drift);
        self
    }

    pub fn healthcare(mut self, available: bool) -> Self {
        self.environment.healthcare_available = available;
        self
    }

    pub fn malaria_region(mut self, malaria: bool) -> Self {
        self.environment.malaria_region = malaria;
        self
    }

    /// Apply a region preset on top of the current settings.
    pub fn region(mut self, preset: RegionPreset) -> Self {
        if let Some((percent, mutation_rate, healthcare, malaria)) = preset.parameters() {
            self.sickle_start_percent = percent;
            self.mutation_rate = mutation_rate;
            self.environment = Environment {
                healthcare_available: healthcare,
                malaria_region: malaria,
            };
        }
        self
    }

    /// Validate every parameter and assemble the configuration.
    pub fn build_config(&self) -> Result<Configuration, BuilderError> {
        let population_size = self
            .population_size
            .ok_or(BuilderError::MissingRequired("population_size"))?;
        let total_generations = self
            .generations
            .ok_or(BuilderError::MissingRequired("generations"))?;

        let mut reproduction =
            ReproductionModel::new(self.reproduction_rate, self.max_births_per_tick)?;
        if let Some(bias) = self.mating_bias {
            reproduction = reproduction
                .with_mating_bias(MatingBias::new(bias.ss_rejection_probability, bias.max_resamples)?);
        }

        let mortality = MortalityModel::new(self.death_rate)?
            .with_cap_fraction(self.death_cap_fraction)?
            .with_removal(self.removal);

        let drift = match self.drift {
            Some(drift) => Some(DriftModel::new(drift.cap_fraction(), drift.removal())?),
            None => None,
        };

        let mut config = Configuration::default();
        config.execution.population_size = population_size;
        config.execution.total_generations = total_generations;
        config.execution.seed = self.seed;
        config.execution.tick_interval_ms = self.tick_interval_ms;
        config.execution.population_floor = self.population_floor;
        config.initialization.sickle_start_percent = self.sickle_start_percent;
        config.evolution.mutation = MutationModel::new(self.mutation_rate)?;
        config.evolution.reproduction = reproduction;
        config.evolution.allow_growth = self.allow_growth;
        config.evolution.mortality = mortality;
        config.evolution.drift = drift;
        config.evolution.environment = self.environment;

        config.validate().map_err(BuilderError::from)?;
        Ok(config)
    }

    /// Build and validate the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        Simulation::from_config(self.build_config()?)
    }
}
