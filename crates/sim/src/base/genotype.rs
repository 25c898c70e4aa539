use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Allele;
use crate::errors::InvalidGenotype;

/// Diploid genotype at the hemoglobin locus.
///
/// Allele order carries no meaning, so a heterozygote is always `AS`
/// regardless of which parent contributed the sickle allele. The ordering
/// `AA < AS < SS` matches the direction of mutation damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genotype {
    /// No sickle allele.
    AA,
    /// Carrier: one sickle allele.
    AS,
    /// Affected: two sickle alleles.
    SS,
}

impl Genotype {
    pub const ALL: [Genotype; 3] = [Genotype::AA, Genotype::AS, Genotype::SS];

    /// Build a genotype from two alleles, normalising `SA` to `AS`.
    #[inline]
    pub const fn from_alleles(first: Allele, second: Allele) -> Self {
        match (first, second) {
            (Allele::A, Allele::A) => Self::AA,
            (Allele::S, Allele::S) => Self::SS,
            (Allele::A, Allele::S) | (Allele::S, Allele::A) => Self::AS,
        }
    }

    /// The two alleles in canonical order.
    #[inline]
    pub const fn alleles(self) -> [Allele; 2] {
        match self {
            Self::AA => [Allele::A, Allele::A],
            Self::AS => [Allele::A, Allele::S],
            Self::SS => [Allele::S, Allele::S],
        }
    }

    /// Number of sickle alleles carried (0, 1 or 2).
    #[inline]
    pub const fn sickle_alleles(self) -> u8 {
        match self {
            Self::AA => 0,
            Self::AS => 1,
            Self::SS => 2,
        }
    }

    #[inline]
    pub const fn is_homozygous(self) -> bool {
        matches!(self, Self::AA | Self::SS)
    }

    /// The allele a homozygote always transmits, `None` for carriers.
    #[inline]
    pub const fn fixed_allele(self) -> Option<Allele> {
        match self {
            Self::AA => Some(Allele::A),
            Self::SS => Some(Allele::S),
            Self::AS => None,
        }
    }

    /// Next step of allele damage: AA -> AS -> SS. `None` once at SS.
    #[inline]
    pub const fn mutated(self) -> Option<Self> {
        match self {
            Self::AA => Some(Self::AS),
            Self::AS => Some(Self::SS),
            Self::SS => None,
        }
    }

    /// Short human label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AA => "healthy",
            Self::AS => "carrier",
            Self::SS => "sickle cell",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AA => "AA",
            Self::AS => "AS",
            Self::SS => "SS",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genotype {
    type Err = InvalidGenotype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(InvalidGenotype(s.to_string()));
        }
        match (Allele::from_ascii(bytes[0]), Allele::from_ascii(bytes[1])) {
            (Some(a), Some(b)) => Ok(Self::from_alleles(a, b)),
            _ => Err(InvalidGenotype(s.to_string())),
        }
    }
}

/// Running per-genotype tallies for a population.
///
/// The store updates these incrementally on every birth, mutation and
/// removal; `total()` must always equal the live population size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenotypeCounts {
    pub healthy: usize,
    pub carrier: usize,
    pub sickle: usize,
}

impl GenotypeCounts {
    pub const fn new(healthy: usize, carrier: usize, sickle: usize) -> Self {
        Self {
            healthy,
            carrier,
            sickle,
        }
    }

    /// Tally a sequence of genotypes by full scan.
    pub fn tally<I: IntoIterator<Item = Genotype>>(genotypes: I) -> Self {
        let mut counts = Self::default();
        for genotype in genotypes {
            counts.add(genotype);
        }
        counts
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.healthy + self.carrier + self.sickle
    }

    #[inline]
    pub fn get(&self, genotype: Genotype) -> usize {
        match genotype {
            Genotype::AA => self.healthy,
            Genotype::AS => self.carrier,
            Genotype::SS => self.sickle,
        }
    }

    #[inline]
    pub fn add(&mut self, genotype: Genotype) {
        *self.slot_mut(genotype) += 1;
    }

    /// Decrement the counter for `genotype`.
    ///
    /// # Panics
    /// Panics in debug builds if the counter is already zero.
    #[inline]
    pub fn remove(&mut self, genotype: Genotype) {
        let slot = self.slot_mut(genotype);
        debug_assert!(*slot > 0, "removing {genotype} from an empty counter");
        *slot = slot.saturating_sub(1);
    }

    /// Move one individual from `from` to `to`.
    #[inline]
    pub fn transfer(&mut self, from: Genotype, to: Genotype) {
        self.remove(from);
        self.add(to);
    }

    /// Total number of `A` and `S` alleles represented by these counts.
    pub fn allele_counts(&self) -> (usize, usize) {
        let a = 2 * self.healthy + self.carrier;
        let s = 2 * self.sickle + self.carrier;
        (a, s)
    }

    fn slot_mut(&mut self, genotype: Genotype) -> &mut usize {
        match genotype {
            Genotype::AA => &mut self.healthy,
            Genotype::AS => &mut self.carrier,
            Genotype::SS => &mut self.sickle,
        }
    }
}

impl fmt::Display for GenotypeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AA={} AS={} SS={}",
            self.healthy, self.carrier, self.sickle
        )
    }
}
