//! Heterozygosity and the inbreeding coefficient
//!
//! At a single bi-allelic locus the carrier share is the observed
//! heterozygosity, and `2pq` is its Hardy-Weinberg expectation.

use sickle_sim::base::GenotypeCounts;

use crate::analysis::composition::{allele_frequencies, genotype_frequencies};
use crate::analysis::utils::ratio;

/// Share of AS individuals.
pub fn observed_heterozygosity(counts: &GenotypeCounts) -> f64 {
    genotype_frequencies(counts).as_
}

/// Expected heterozygosity under random mating
///
/// # Formula
///
/// $$H_e = 2pq$$
pub fn expected_heterozygosity(counts: &GenotypeCounts) -> f64 {
    let freqs = allele_frequencies(counts);
    2.0 * freqs.a * freqs.s
}

/// Calculate the inbreeding coefficient (fixation index)
///
/// # Formula
///
/// $$F = 1 - \frac{H_o}{H_e}$$
///
/// Positive F means a carrier deficit relative to Hardy-Weinberg, negative
/// F a carrier excess. Returns 0.0 when the locus is fixed (`H_e = 0`).
pub fn inbreeding_coefficient(counts: &GenotypeCounts) -> f64 {
    let expected = expected_heterozygosity(counts);
    if expected == 0.0 {
        return 0.0;
    }
    1.0 - ratio(observed_heterozygosity(counts), expected)
}
