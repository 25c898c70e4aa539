//! Base types for the single bi-allelic locus.
//!
//! This module provides the allele and genotype vocabulary shared by every
//! other part of the crate, plus the incremental genotype counters.

mod allele;
mod genotype;

pub use allele::Allele;
pub use genotype::{Genotype, GenotypeCounts};

/// Smallest population the store will shrink to. Removals that would go
/// below this are refused.
pub const POPULATION_FLOOR: usize = 10;
