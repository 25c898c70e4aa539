//! Genotype- and age-weighted death selection.
//!
//! The base `death_rate` is scaled by a genotype multiplier. SS individuals
//! get a multiplier that depends on both age and healthcare availability:
//! without care, infants die at close to the base rate. Individuals older
//! than [`ELDERLY_AGE`] carry a flat extra risk on top, unless mortality is
//! switched off entirely with a zero `death_rate`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::culling::{cull, RemovalPolicy};
use crate::base::Genotype;
use crate::errors::{check_probability, ParameterError};
use crate::genome::IndividualId;
use crate::simulation::Population;

/// SS individuals younger than this count as infants.
pub const INFANT_AGE: u32 = 5;

/// Individuals strictly older than this get [`ELDERLY_PENALTY`].
pub const ELDERLY_AGE: u32 = 30;

/// Flat rate added after the genotype multiplier for the elderly.
pub const ELDERLY_PENALTY: f64 = 0.05;

/// Genotype multiplier applied to the base death rate.
pub fn genotype_multiplier(genotype: Genotype, age: u32, healthcare: bool) -> f64 {
    match genotype {
        Genotype::SS => match (age < INFANT_AGE, healthcare) {
            (true, true) => 0.05,
            (true, false) => 0.9,
            (false, true) => 0.1,
            (false, false) => 0.5,
        },
        Genotype::AS => 0.6,
        Genotype::AA => 0.2,
    }
}

/// Death selection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortalityModel {
    /// Base per-tick death probability before multipliers
    death_rate: f64,
    /// Fraction of the stage-start population that may die in one tick
    cap_fraction: f64,
    /// Scan termination rule
    #[serde(default)]
    removal: RemovalPolicy,
}

impl Default for MortalityModel {
    fn default() -> Self {
        Self {
            death_rate: 0.01,
            cap_fraction: 0.1,
            removal: RemovalPolicy::default(),
        }
    }
}

impl MortalityModel {
    /// Create a mortality model with the default cap and removal policy.
    ///
    /// # Errors
    /// Returns an error if `death_rate` is not within `[0.0, 1.0]`.
    pub fn new(death_rate: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            death_rate: check_probability("death_rate", death_rate)?,
            ..Self::default()
        })
    }

    pub fn with_cap_fraction(mut self, cap_fraction: f64) -> Result<Self, ParameterError> {
        self.cap_fraction = check_probability("death_cap_fraction", cap_fraction)?;
        Ok(self)
    }

    pub fn with_removal(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }

    #[inline]
    pub fn death_rate(&self) -> f64 {
        self.death_rate
    }

    #[inline]
    pub fn cap_fraction(&self) -> f64 {
        self.cap_fraction
    }

    #[inline]
    pub fn removal(&self) -> RemovalPolicy {
        self.removal
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        check_probability("death_rate", self.death_rate)?;
        check_probability("death_cap_fraction", self.cap_fraction)?;
        Ok(())
    }

    /// Per-tick death probability for one individual.
    ///
    /// A zero `death_rate` disables mortality, elderly penalty included.
    pub fn death_probability(&self, genotype: Genotype, age: u32, healthcare: bool) -> f64 {
        if self.death_rate == 0.0 {
            return 0.0;
        }
        let mut p = self.death_rate * genotype_multiplier(genotype, age, healthcare);
        if age > ELDERLY_AGE {
            p += ELDERLY_PENALTY;
        }
        p
    }

    /// Maximum deaths in a tick for a population of `size`.
    pub fn death_cap(&self, size: usize) -> usize {
        (size as f64 * self.cap_fraction).floor() as usize
    }

    /// Run one mortality scan, returning the handles of the dead.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        population: &mut Population,
        healthcare: bool,
        rng: &mut R,
    ) -> Vec<IndividualId> {
        let cap = self.death_cap(population.size());
        cull(population, cap, self.removal, rng, |ind| {
            self.death_probability(ind.genotype(), ind.age(), healthcare)
        })
    }
}
