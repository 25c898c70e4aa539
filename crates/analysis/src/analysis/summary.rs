//! One-shot summary of a generation's genotype counts.

use serde::{Deserialize, Serialize};
use sickle_sim::base::GenotypeCounts;

use crate::analysis::composition::{
    allele_frequencies, genotype_frequencies, AlleleFrequencies, GenotypeFrequencies,
};
use crate::analysis::diversity::{
    expected_heterozygosity, inbreeding_coefficient, observed_heterozygosity,
};
use crate::analysis::equilibrium::hardy_weinberg_chi_square;

/// Every statistic in this crate for one set of counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub generation: usize,
    pub population_size: usize,
    pub counts: GenotypeCounts,
    pub allele_frequencies: AlleleFrequencies,
    pub genotype_frequencies: GenotypeFrequencies,
    pub observed_heterozygosity: f64,
    pub expected_heterozygosity: f64,
    pub inbreeding_coefficient: f64,
    pub hwe_chi_square: f64,
}

pub fn summarize(generation: usize, counts: &GenotypeCounts) -> PopulationSummary {
    PopulationSummary {
        generation,
        population_size: counts.total(),
        counts: *counts,
        allele_frequencies: allele_frequencies(counts),
        genotype_frequencies: genotype_frequencies(counts),
        observed_heterozygosity: observed_heterozygosity(counts),
        expected_heterozygosity: expected_heterozygosity(counts),
        inbreeding_coefficient: inbreeding_coefficient(counts),
        hwe_chi_square: hardy_weinberg_chi_square(counts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let summary = summarize(12, &GenotypeCounts::new(36, 48, 16));
        assert_eq!(summary.generation, 12);
        assert_eq!(summary.population_size, 100);
        assert!((summary.allele_frequencies.s - 0.4).abs() < 1e-12);
        assert!((summary.observed_heterozygosity - 0.48).abs() < 1e-12);
        assert!(summary.hwe_chi_square < 1e-9);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = summarize(0, &GenotypeCounts::new(1, 1, 1));
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value["population_size"], 3);
        assert!(value["allele_frequencies"]["s"].is_number());
    }
}
