//! Read-only projections handed to reporting collaborators.

use serde::{Deserialize, Serialize};

use crate::base::{Allele, GenotypeCounts};
use crate::evolution::MutationEvent;
use crate::genome::{Individual, IndividualId};

/// Count of `A` and `S` alleles across both copies of every member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlleleTally {
    pub a: usize,
    pub s: usize,
}

impl AlleleTally {
    #[inline]
    pub fn total(&self) -> usize {
        self.a + self.s
    }

    /// Frequency of the sickle allele, 0.0 for an empty tally.
    pub fn sickle_frequency(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.s as f64 / n as f64,
        }
    }
}

/// Frozen copy of one generation's live members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    generation: usize,
    individuals: Vec<Individual>,
}

impl GenerationSnapshot {
    pub fn new(generation: usize, individuals: Vec<Individual>) -> Self {
        Self {
            generation,
            individuals,
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Tally alleles over every member of the snapshot.
    pub fn allele_tally(&self) -> AlleleTally {
        let mut tally = AlleleTally::default();
        for allele in self.individuals.iter().flat_map(Individual::alleles) {
            match allele {
                Allele::A => tally.a += 1,
                Allele::S => tally.s += 1,
            }
        }
        tally
    }

    pub fn counts(&self) -> GenotypeCounts {
        GenotypeCounts::tally(self.individuals.iter().map(Individual::genotype))
    }
}

/// Everything that happened during one completed tick.
///
/// Rendering collaborators use the id lists to animate births, deaths and
/// mutations; charting only needs `generation` and `counts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub generation: usize,
    pub counts: GenotypeCounts,
    pub mutations: Vec<MutationEvent>,
    pub births: Vec<IndividualId>,
    pub deaths: Vec<IndividualId>,
    pub drifted: Vec<IndividualId>,
}

impl TickReport {
    /// Population size after the tick.
    pub fn population_size(&self) -> usize {
        self.counts.total()
    }

    pub fn stats(&self) -> TickStats {
        TickStats {
            generation: self.generation,
            healthy: self.counts.healthy,
            carrier: self.counts.carrier,
            sickle: self.counts.sickle,
        }
    }
}

/// The per-tick numbers emitted to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    pub generation: usize,
    pub healthy: usize,
    pub carrier: usize,
    pub sickle: usize,
}

impl TickStats {
    pub fn population_size(&self) -> usize {
        self.healthy + self.carrier + self.sickle
    }
}
