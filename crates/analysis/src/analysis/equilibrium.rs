//! Hardy-Weinberg expectation and goodness of fit

use sickle_sim::base::GenotypeCounts;

use crate::analysis::composition::allele_frequencies;

/// Expected `[AA, AS, SS]` counts given the observed allele frequencies
///
/// # Formula
///
/// $$E = N \cdot (p^2,\ 2pq,\ q^2)$$
pub fn hardy_weinberg_expected(counts: &GenotypeCounts) -> [f64; 3] {
    let n = counts.total() as f64;
    let freqs = allele_frequencies(counts);
    let (p, q) = (freqs.a, freqs.s);
    [n * p * p, n * 2.0 * p * q, n * q * q]
}

/// Pearson chi-square statistic against Hardy-Weinberg proportions
///
/// Classes with zero expectation are skipped. One degree of freedom;
/// values above 3.84 reject equilibrium at the 5% level.
pub fn hardy_weinberg_chi_square(counts: &GenotypeCounts) -> f64 {
    let observed = [counts.healthy, counts.carrier, counts.sickle];
    hardy_weinberg_expected(counts)
        .iter()
        .zip(observed)
        .filter(|(e, _)| **e > 0.0)
        .map(|(e, o)| {
            let diff = o as f64 - e;
            diff * diff / e
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_counts() {
        let expected = hardy_weinberg_expected(&GenotypeCounts::new(36, 48, 16));
        // p = 0.6, q = 0.4
        assert!((expected[0] - 36.0).abs() < 1e-9);
        assert!((expected[1] - 48.0).abs() < 1e-9);
        assert!((expected[2] - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_chi_square_at_equilibrium() {
        assert!(hardy_weinberg_chi_square(&GenotypeCounts::new(36, 48, 16)) < 1e-9);
    }

    #[test]
    fn test_chi_square_detects_deficit() {
        // No carriers at all: strongly out of equilibrium
        let chi = hardy_weinberg_chi_square(&GenotypeCounts::new(50, 0, 50));
        assert!(chi > 3.84);
        assert!((chi - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_fixed() {
        assert_eq!(hardy_weinberg_chi_square(&GenotypeCounts::default()), 0.0);
        assert_eq!(hardy_weinberg_chi_square(&GenotypeCounts::new(30, 0, 0)), 0.0);
    }
}
