//! Rate- and cap-bounded births.
//!
//! Each tick produces `min(floor(size * rate), max_births_per_tick)`
//! offspring. The quota is fixed at the start of the stage, so births within
//! a tick do not compound it. Parents are drawn uniformly from the live
//! population (newborns of the same tick included), optionally rejecting SS
//! candidates to model reduced fertility.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::inheritance::resolve;
use crate::base::Genotype;
use crate::errors::{check_probability, ParameterError};
use crate::genome::IndividualId;
use crate::simulation::Population;

/// Rejection sampling against SS parents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatingBias {
    /// Probability that an SS candidate is rejected and resampled
    pub ss_rejection_probability: f64,
    /// Rejections allowed before the current candidate is accepted anyway
    pub max_resamples: usize,
}

impl Default for MatingBias {
    fn default() -> Self {
        Self {
            ss_rejection_probability: 0.8,
            max_resamples: 16,
        }
    }
}

impl MatingBias {
    pub fn new(ss_rejection_probability: f64, max_resamples: usize) -> Result<Self, ParameterError> {
        Ok(Self {
            ss_rejection_probability: check_probability(
                "ss_rejection_probability",
                ss_rejection_probability,
            )?,
            max_resamples,
        })
    }
}

/// Birth production parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReproductionModel {
    /// Births per live individual per tick, before capping
    rate: f64,
    /// Hard cap on births in one tick
    max_births_per_tick: usize,
    /// Optional bias against SS parents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mating_bias: Option<MatingBias>,
}

impl Default for ReproductionModel {
    fn default() -> Self {
        Self {
            rate: 0.02,
            max_births_per_tick: 5,
            mating_bias: None,
        }
    }
}

impl ReproductionModel {
    /// Create a reproduction model with the given rate and per-tick cap.
    ///
    /// # Errors
    /// Returns an error if `rate` is not within `[0.0, 1.0]`.
    pub fn new(rate: f64, max_births_per_tick: usize) -> Result<Self, ParameterError> {
        Ok(Self {
            rate: check_probability("reproduction_rate", rate)?,
            max_births_per_tick,
            mating_bias: None,
        })
    }

    /// Enable rejection of SS parents.
    pub fn with_mating_bias(mut self, bias: MatingBias) -> Self {
        self.mating_bias = Some(bias);
        self
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn max_births_per_tick(&self) -> usize {
        self.max_births_per_tick
    }

    #[inline]
    pub fn mating_bias(&self) -> Option<&MatingBias> {
        self.mating_bias.as_ref()
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        check_probability("reproduction_rate", self.rate)?;
        if let Some(bias) = &self.mating_bias {
            check_probability("ss_rejection_probability", bias.ss_rejection_probability)?;
        }
        Ok(())
    }

    /// Births allowed this tick for a population of `size`.
    pub fn birth_quota(&self, size: usize) -> usize {
        let raw = (size as f64 * self.rate).floor() as usize;
        raw.min(self.max_births_per_tick)
    }

    /// Produce this tick's offspring, returning their handles in birth order.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        population: &mut Population,
        rng: &mut R,
    ) -> Vec<IndividualId> {
        let quota = self.birth_quota(population.size());
        let mut births = Vec::with_capacity(quota);

        for _ in 0..quota {
            let Some(parent1) = self.pick_parent(population, rng) else {
                break;
            };
            let Some(parent2) = self.pick_parent(population, rng) else {
                break;
            };
            let (Some(g1), Some(g2)) = (
                population.individual(parent1).map(|p| p.genotype()),
                population.individual(parent2).map(|p| p.genotype()),
            ) else {
                break;
            };

            let genotype = resolve(g1, g2, rng);
            if let Some(child) = population.add_offspring(parent1, parent2, genotype) {
                births.push(child);
            }
        }
        births
    }

    /// Draw one parent, applying the mating bias if configured.
    fn pick_parent<R: Rng + ?Sized>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Option<IndividualId> {
        let mut index = population.random_index(rng)?;

        if let Some(bias) = &self.mating_bias {
            for _ in 0..bias.max_resamples {
                let is_ss = population
                    .get(index)
                    .is_some_and(|ind| ind.genotype() == Genotype::SS);
                if !is_ss || rng.random::<f64>() >= bias.ss_rejection_probability {
                    break;
                }
                trace!(index, "rejected SS mating candidate");
                index = population.random_index(rng)?;
            }
        }

        population.ids().get(index).copied()
    }
}
