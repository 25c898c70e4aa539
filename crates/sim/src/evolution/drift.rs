//! Genotype-blind random culling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::culling::{cull, RemovalPolicy};
use crate::errors::{check_probability, ParameterError};
use crate::genome::IndividualId;
use crate::simulation::Population;

/// Neutral population loss, scaled down as the population grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftModel {
    /// Fraction of the stage-start population that may be removed per tick
    cap_fraction: f64,
    #[serde(default)]
    removal: RemovalPolicy,
}

impl Default for DriftModel {
    fn default() -> Self {
        Self {
            cap_fraction: 0.05,
            removal: RemovalPolicy::default(),
        }
    }
}

impl DriftModel {
    pub fn new(cap_fraction: f64, removal: RemovalPolicy) -> Result<Self, ParameterError> {
        Ok(Self {
            cap_fraction: check_probability("drift_cap_fraction", cap_fraction)?,
            removal,
        })
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
        check_probability("drift_cap_fraction", self.cap_fraction).map(|_| ())
    }

    /// Per-individual removal probability for a population of `size`.
    pub fn drift_probability(size: usize) -> f64 {
        match size {
            0..=499 => 0.02,
            500..=999 => 0.005,
            _ => 0.001,
        }
    }

    pub fn drift_cap(&self, size: usize) -> usize {
        (size as f64 * self.cap_fraction).floor() as usize
    }

    /// Run one drift scan, returning the handles removed.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        population: &mut Population,
        rng: &mut R,
    ) -> Vec<IndividualId> {
        let size = population.size();
        let p = Self::drift_probability(size);
        cull(population, self.drift_cap(size), self.removal, rng, |_| p)
    }
}
