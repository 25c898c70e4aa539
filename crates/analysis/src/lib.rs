//! Population genetics statistics over sickle-sim populations.
//!
//! Everything here is a read-only projection of genotype counts or a
//! generation snapshot; nothing feeds back into the simulation.

pub mod analysis;

pub use analysis::{
    allele_frequencies, expected_heterozygosity, genotype_frequencies, hardy_weinberg_chi_square,
    hardy_weinberg_expected, inbreeding_coefficient, observed_heterozygosity, summarize,
    AlleleFrequencies, GenotypeFrequencies, PopulationSummary,
};
