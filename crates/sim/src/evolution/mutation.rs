//! Per-tick allele damage.
//!
//! Every live individual independently mutates with probability `rate`
//! each tick. A mutation converts one `A` allele into `S`, so the genotype
//! walks AA -> AS -> SS and never back. SS individuals still consume a draw
//! but have nothing left to damage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::Genotype;
use crate::errors::{check_probability, ParameterError};
use crate::genome::IndividualId;
use crate::simulation::Population;

/// One genotype promotion that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationEvent {
    pub id: IndividualId,
    pub from: Genotype,
    pub to: Genotype,
}

/// Uniform per-individual, per-tick mutation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationModel {
    /// Probability that a given individual mutates in one tick
    rate: f64,
}

impl Default for MutationModel {
    fn default() -> Self {
        Self { rate: 0.005 }
    }
}

impl MutationModel {
    /// Create a mutation model.
    ///
    /// # Errors
    /// Returns an error if `rate` is not within `[0.0, 1.0]`.
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            rate: check_probability("mutation_rate", rate)?,
        })
    }

    /// A model that never mutates.
    pub const fn none() -> Self {
        Self { rate: 0.0 }
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Re-check the rate, for models that came from deserialization.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_probability("mutation_rate", self.rate).map(|_| ())
    }

    /// Mutate the population in store order, returning every promotion.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        population: &mut Population,
        rng: &mut R,
    ) -> Vec<MutationEvent> {
        let mut events = Vec::new();
        for index in 0..population.size() {
            if rng.random::<f64>() < self.rate {
                if let Some((id, from, to)) = population.mutate_at(index) {
                    events.push(MutationEvent { id, from, to });
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::GenotypeCounts;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population_of(genotypes: &[Genotype]) -> Population {
        let mut pop = Population::with_floor("test", 0);
        for &g in genotypes {
            pop.add_founder(g);
        }
        pop
    }

    #[test]
    fn test_invalid_rate() {
        assert!(MutationModel::new(1.5).is_err());
        assert!(MutationModel::new(-0.01).is_err());
        assert_eq!(MutationModel::new(0.25).unwrap().rate(), 0.25);
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut pop = population_of(&[Genotype::AA; 50]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert!(MutationModel::none().apply(&mut pop, &mut rng).is_empty());
        }
        assert_eq!(pop.counts(), GenotypeCounts::new(50, 0, 0));
    }

    #[test]
    fn test_full_rate_promotes_one_step() {
        let mut pop = population_of(&[Genotype::AA, Genotype::AS, Genotype::SS]);
        let mut rng = StdRng::seed_from_u64(42);
        let model = MutationModel::new(1.0).unwrap();

        let events = model.apply(&mut pop, &mut rng);
        assert_eq!(events.len(), 2);
        assert_eq!((events[0].from, events[0].to), (Genotype::AA, Genotype::AS));
        assert_eq!((events[1].from, events[1].to), (Genotype::AS, Genotype::SS));
        assert_eq!(pop.counts(), GenotypeCounts::new(0, 1, 2));

        model.apply(&mut pop, &mut rng);
        assert_eq!(pop.counts(), GenotypeCounts::new(0, 0, 3));
        assert!(model.apply(&mut pop, &mut rng).is_empty());
    }

    #[test]
    fn test_mutation_never_reverses() {
        let mut pop = population_of(&[Genotype::AA; 30]);
        let mut rng = StdRng::seed_from_u64(9);
        let model = MutationModel::new(0.3).unwrap();
        for _ in 0..10 {
            for event in model.apply(&mut pop, &mut rng) {
                assert!(event.to > event.from);
            }
            assert!(pop.check_invariants().is_ok());
        }
    }
}
