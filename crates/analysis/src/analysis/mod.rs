//! Population genetics analysis tools for sickle-sim
//!
//! This module provides:
//! - Allele and genotype composition
//! - Heterozygosity and the inbreeding coefficient
//! - Hardy-Weinberg expectation and goodness of fit
//! - A serializable per-generation summary

pub mod composition;
pub mod diversity;
pub mod equilibrium;
pub mod summary;
mod utils;

// Re-export commonly used functions
pub use composition::{
    allele_frequencies, genotype_frequencies, snapshot_allele_frequencies, AlleleFrequencies,
    GenotypeFrequencies,
};
pub use diversity::{expected_heterozygosity, inbreeding_coefficient, observed_heterozygosity};
pub use equilibrium::{hardy_weinberg_chi_square, hardy_weinberg_expected};
pub use summary::{summarize, PopulationSummary};
