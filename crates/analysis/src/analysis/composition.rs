//! Allele and genotype composition
//!
//! Functions work on the incrementally maintained [`GenotypeCounts`], or on
//! a frozen [`GenerationSnapshot`] when the caller holds one.

use serde::{Deserialize, Serialize};
use sickle_sim::base::GenotypeCounts;
use sickle_sim::simulation::GenerationSnapshot;

use crate::analysis::utils::ratio;

/// Frequencies of the two alleles; `a + s == 1.0` unless the population is
/// empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlleleFrequencies {
    /// Frequency of the normal allele (p)
    pub a: f64,
    /// Frequency of the sickle allele (q)
    pub s: f64,
}

/// Frequencies of the three genotypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenotypeFrequencies {
    pub aa: f64,
    #[serde(rename = "as")]
    pub as_: f64,
    pub ss: f64,
}

/// Calculate allele frequencies from genotype counts
///
/// # Formula
///
/// $$q = \frac{n_{AS} + 2 n_{SS}}{2N}, \quad p = 1 - q$$
///
/// # Examples
///
/// ```
/// use sickle_analysis::analysis::composition::allele_frequencies;
/// use sickle_sim::base::GenotypeCounts;
///
/// let freqs = allele_frequencies(&GenotypeCounts::new(1, 2, 1));
/// assert_eq!(freqs.s, 0.5);
/// ```
pub fn allele_frequencies(counts: &GenotypeCounts) -> AlleleFrequencies {
    let (a, s) = counts.allele_counts();
    let total = (a + s) as f64;
    AlleleFrequencies {
        a: ratio(a as f64, total),
        s: ratio(s as f64, total),
    }
}

/// Allele frequencies from a snapshot's allele tally.
pub fn snapshot_allele_frequencies(snapshot: &GenerationSnapshot) -> AlleleFrequencies {
    let tally = snapshot.allele_tally();
    let total = tally.total() as f64;
    AlleleFrequencies {
        a: ratio(tally.a as f64, total),
        s: ratio(tally.s as f64, total),
    }
}

/// Calculate genotype frequencies from counts
pub fn genotype_frequencies(counts: &GenotypeCounts) -> GenotypeFrequencies {
    let total = counts.total() as f64;
    GenotypeFrequencies {
        aa: ratio(counts.healthy as f64, total),
        as_: ratio(counts.carrier as f64, total),
        ss: ratio(counts.sickle as f64, total),
    }
}
