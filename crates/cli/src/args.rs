use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use sickle_sim::evolution::{MatingBias, RemovalPolicy};
use sickle_sim::simulation::{Configuration, RegionPreset, SimulationBuilder};

use crate::defaults;

/// Removal rule for mortality and drift scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RemovalArg {
    /// Stop each scan after the first removal
    FirstHit,
    /// Remove until the per-tick cap is reached
    UpToCap,
}

impl From<RemovalArg> for RemovalPolicy {
    fn from(arg: RemovalArg) -> Self {
        match arg {
            RemovalArg::FirstHit => RemovalPolicy::FirstHit,
            RemovalArg::UpToCap => RemovalPolicy::UpToCap,
        }
    }
}

/// Simulation parameters shared by every command that builds a run.
#[derive(Args, Debug, Clone)]
pub struct SimArgs {
    /// Founder population size
    #[arg(short = 'n', long, default_value_t = defaults::POPULATION_SIZE)]
    pub population_size: usize,

    /// Number of generations (ticks) to run [default: 1000]
    ///
    /// With --config, overrides the file's value when given.
    #[arg(short = 'g', long)]
    pub generations: Option<usize>,

    /// Region preset (west-africa, united-states, europe, custom)
    ///
    /// Sets the sickle start, mutation rate, healthcare and malaria flags.
    /// Explicit flags below still take precedence.
    #[arg(short, long)]
    pub region: Option<RegionPreset>,

    /// Percentage of founders carrying at least one S allele (0-100)
    ///
    /// Defaults to 30 unless a region preset sets it.
    #[arg(short = 's', long)]
    pub sickle_start: Option<u32>,

    /// Per-individual mutation probability per tick
    ///
    /// Defaults to 0.005 unless a region preset sets it.
    #[arg(short = 'm', long)]
    pub mutation_rate: Option<f64>,

    /// Enable births
    #[arg(long)]
    pub allow_growth: bool,

    /// Births per individual per tick, before capping
    #[arg(long, default_value_t = defaults::REPRODUCTION_RATE)]
    pub reproduction_rate: f64,

    /// Hard cap on births per tick
    #[arg(long, default_value_t = defaults::MAX_BIRTHS_PER_TICK)]
    pub max_births: usize,

    /// Reject SS parents 80% of the time when choosing mates
    #[arg(long)]
    pub mating_bias: bool,

    /// Base death probability per tick
    #[arg(short = 'd', long, default_value_t = defaults::DEATH_RATE)]
    pub death_rate: f64,

    /// Scan rule for mortality and drift
    #[arg(long, value_enum, default_value_t = RemovalArg::UpToCap)]
    pub removal: RemovalArg,

    /// Enable genotype-blind drift
    #[arg(long)]
    pub drift: bool,

    /// No healthcare for SS individuals
    #[arg(long)]
    pub no_healthcare: bool,

    /// Not a malaria region (reported only)
    #[arg(long)]
    pub no_malaria: bool,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Clock period in milliseconds (minimum 1)
    #[arg(long, default_value_t = defaults::TICK_INTERVAL_MS)]
    pub tick_interval_ms: u64,
}

impl SimArgs {
    /// Turn the flags into a validated configuration.
    pub fn build_config(&self) -> Result<Configuration> {
        let mut builder = SimulationBuilder::new()
            .population_size(self.population_size)
            .generations(self.generations.unwrap_or(defaults::GENERATIONS))
            .sickle_start_percent(defaults::SICKLE_START_PERCENT)
            .mutation_rate(defaults::MUTATION_RATE);

        if let Some(region) = self.region {
            builder = builder.region(region);
        }
        if let Some(percent) = self.sickle_start {
            builder = builder.sickle_start_percent(percent);
        }
        if let Some(rate) = self.mutation_rate {
            builder = builder.mutation_rate(rate);
        }
        if self.no_healthcare {
            builder = builder.healthcare(false);
        }
        if self.no_malaria {
            builder = builder.malaria_region(false);
        }
        if self.mating_bias {
            builder = builder.mating_bias(MatingBias::default());
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }

        builder
            .allow_growth(self.allow_growth)
            .reproduction_rate(self.reproduction_rate)
            .max_births_per_tick(self.max_births)
            .death_rate(self.death_rate)
            .removal_policy(self.removal.into())
            .drift(self.drift)
            .tick_interval_ms(self.tick_interval_ms.max(1))
            .build_config()
            .context("Invalid simulation parameters")
    }
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output configuration file
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    #[command(flatten)]
    pub sim: SimArgs,
}

/// Where a run's parameters come from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Load parameters from a JSON file written by `sickle init`
    ///
    /// Other parameter flags are ignored, except --seed and --generations
    /// when given explicitly.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub sim: SimArgs,
}

impl SourceArgs {
    pub fn load(&self) -> Result<Configuration> {
        let Some(path) = &self.config else {
            return self.sim.build_config();
        };
        let mut config = Configuration::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        if let Some(seed) = self.sim.seed {
            config.execution.seed = Some(seed);
        }
        if let Some(generations) = self.sim.generations {
            config.execution.total_generations = generations;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Run ticks back to back instead of pacing them on the clock
    #[arg(long)]
    pub fast: bool,

    /// Print a table row every N generations (0 disables the table)
    #[arg(long, default_value_t = defaults::REPORT_EVERY)]
    pub report_every: usize,

    /// Print only a JSON summary at the end
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug)]
pub struct LineageArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Levels of descendants to print below the root ancestor
    #[arg(long, default_value_t = defaults::LINEAGE_DEPTH)]
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        sim: SimArgs,
    }

    fn parse(args: &[&str]) -> SimArgs {
        Harness::parse_from(std::iter::once("sickle").chain(args.iter().copied())).sim
    }

    #[derive(Parser)]
    struct SourceHarness {
        #[command(flatten)]
        source: SourceArgs,
    }

    fn parse_source(args: &[&str]) -> SourceArgs {
        SourceHarness::parse_from(std::iter::once("sickle").chain(args.iter().copied())).source
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).build_config().unwrap();
        assert_eq!(config, {
            let mut expected = Configuration::default();
            expected.execution.total_generations = defaults::GENERATIONS;
            expected
        });
    }

    #[test]
    fn test_region_then_explicit_override() {
        let config = parse(&["--region", "west-africa", "--sickle-start", "25"])
            .build_config()
            .unwrap();
        assert_eq!(config.initialization.sickle_start_percent, 25);
        assert_eq!(config.evolution.mutation.rate(), 0.001);
        assert!(!config.evolution.environment.healthcare_available);
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--allow-growth",
            "--drift",
            "--removal",
            "first-hit",
            "--no-malaria",
            "--seed",
            "9",
        ])
        .build_config()
        .unwrap();
        assert!(config.evolution.allow_growth);
        assert_eq!(
            config.evolution.drift.map(|d| d.removal()),
            Some(RemovalPolicy::FirstHit)
        );
        assert_eq!(config.evolution.mortality.removal(), RemovalPolicy::FirstHit);
        assert!(!config.evolution.environment.malaria_region);
        assert_eq!(config.execution.seed, Some(9));
    }

    #[test]
    fn test_config_file_generations_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.json");
        let mut file_config = Configuration::default();
        file_config.execution.total_generations = 50;
        file_config.to_json_file(&path).unwrap();
        let path = path.to_str().unwrap();

        let kept = parse_source(&["--config", path]).load().unwrap();
        assert_eq!(kept.execution.total_generations, 50);

        // an explicit value equal to the CLI default still wins
        let overridden = parse_source(&["--config", path, "-g", "1000"]).load().unwrap();
        assert_eq!(overridden.execution.total_generations, defaults::GENERATIONS);

        let overridden = parse_source(&["--config", path, "--generations", "7"])
            .load()
            .unwrap();
        assert_eq!(overridden.execution.total_generations, 7);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        assert!(parse(&["--death-rate", "1.5"]).build_config().is_err());
    }
}
