//! Simulation engine for the sickle-cell tick pipeline.
//!
//! One tick runs, strictly in order: age everyone, mutate, reproduce (when
//! growth is enabled), mortality, drift (when configured). The accounting
//! invariants are re-checked after every tick.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::base::GenotypeCounts;
use crate::errors::{BuilderError, SimulationError};
use crate::genome::IndividualId;
use crate::simulation::{
    initialize, Configuration, Environment, GenerationSnapshot, Population, TickReport,
};

/// Main simulation engine.
#[derive(Debug)]
pub struct Simulation {
    /// Current population and its lineage
    population: Population,
    /// Full configuration the run was created with
    config: Configuration,
    /// Random number generator (using Xoshiro256++ for better performance)
    rng: Xoshiro256PlusPlus,
}

impl Simulation {
    /// Create a simulation with freshly generated founders.
    ///
    /// The generator is seeded from `execution.seed`, or from the thread RNG
    /// when no seed is given.
    pub fn from_config(config: Configuration) -> Result<Self, BuilderError> {
        config.validate()?;

        let mut rng = match config.execution.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };

        let population = initialize(
            &config.initialization,
            config.execution.population_size,
            config.execution.population_floor,
            &mut rng,
        );

        Ok(Self {
            population,
            config,
            rng,
        })
    }

    /// Get the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get the current generation number.
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    pub fn counts(&self) -> GenotypeCounts {
        self.population.counts()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        self.config.evolution.environment
    }

    /// A founder reached through `parent1` links from the first live member.
    pub fn root_ancestor(&self) -> Option<IndividualId> {
        self.population.root_ancestor()
    }

    pub fn snapshot(&self) -> GenerationSnapshot {
        self.population.snapshot()
    }

    /// Advance the simulation by one tick.
    ///
    /// # Errors
    /// Returns [`SimulationError::Invariant`] if the population's counters
    /// or floor no longer hold after the tick.
    pub fn step(&mut self) -> Result<TickReport, SimulationError> {
        let evolution = &self.config.evolution;
        let population = &mut self.population;
        let rng = &mut self.rng;

        population.increment_generation();

        // 1. Age
        population.age_all();

        // 2. Mutation
        let mutations = evolution.mutation.apply(population, rng);

        // 3. Reproduction
        let births = if evolution.allow_growth {
            evolution.reproduction.apply(population, rng)
        } else {
            Vec::new()
        };

        // 4. Mortality
        let deaths = evolution.mortality.apply(
            population,
            evolution.environment.healthcare_available,
            rng,
        );

        // 5. Drift
        let drifted = match &evolution.drift {
            Some(drift) => drift.apply(population, rng),
            None => Vec::new(),
        };

        population.check_invariants()?;

        let report = TickReport {
            generation: population.generation(),
            counts: population.counts(),
            mutations,
            births,
            deaths,
            drifted,
        };

        debug!(
            generation = report.generation,
            size = report.population_size(),
            healthy = report.counts.healthy,
            carrier = report.counts.carrier,
            sickle = report.counts.sickle,
            mutations = report.mutations.len(),
            births = report.births.len(),
            deaths = report.deaths.len(),
            drifted = report.drifted.len(),
            "tick complete"
        );

        Ok(report)
    }

    /// Run the configured number of generations, returning the last report.
    pub fn run(&mut self) -> Result<Option<TickReport>, SimulationError> {
        self.run_for(self.config.execution.total_generations)
    }

    /// Run a specific number of ticks, returning the last report.
    pub fn run_for(&mut self, generations: usize) -> Result<Option<TickReport>, SimulationError> {
        let mut last = None;
        for _ in 0..generations {
            last = Some(self.step()?);
        }
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationBuilder;

    fn create_test_simulation() -> Simulation {
        SimulationBuilder::new()
            .population_size(100)
            .generations(20)
            .sickle_start_percent(30)
            .allow_growth(true)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = create_test_simulation();
        assert_eq!(sim.population().size(), 100);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.counts().total(), 100);
    }

    #[test]
    fn test_step_advances_generation() {
        let mut sim = create_test_simulation();
        let report = sim.step().unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(sim.generation(), 1);
        assert_eq!(report.counts, sim.counts());
        assert!(sim.population().iter().all(|ind| ind.age() >= 1));
    }

    #[test]
    fn test_report_accounts_for_size_change() {
        let mut sim = create_test_simulation();
        for _ in 0..20 {
            let before = sim.population().size();
            let report = sim.step().unwrap();
            let expected =
                before + report.births.len() - report.deaths.len() - report.drifted.len();
            assert_eq!(report.population_size(), expected);
        }
    }

    #[test]
    fn test_run_for() {
        let mut sim = create_test_simulation();
        let last = sim.run_for(7).unwrap().unwrap();
        assert_eq!(last.generation, 7);
        assert!(sim.run_for(0).unwrap().is_none());
    }

    #[test]
    fn test_run_uses_total_generations() {
        let mut sim = create_test_simulation();
        sim.run().unwrap();
        assert_eq!(sim.generation(), 20);
    }

    #[test]
    fn test_no_growth_no_births() {
        let mut sim = SimulationBuilder::new()
            .population_size(200)
            .generations(10)
            .allow_growth(false)
            .seed(1)
            .build()
            .unwrap();
        for _ in 0..10 {
            assert!(sim.step().unwrap().births.is_empty());
        }
        assert!(sim.population().size() <= 200);
    }

    #[test]
    fn test_same_seed_same_reports() {
        let mut a = create_test_simulation();
        let mut b = create_test_simulation();
        for _ in 0..15 {
            assert_eq!(a.step().unwrap(), b.step().unwrap());
        }
    }
}
