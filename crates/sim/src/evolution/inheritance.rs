//! Mendelian inheritance at the single locus.
//!
//! Each parent transmits one allele. Homozygotes always pass on their only
//! allele; carriers pass on `A` or `S` with equal probability, drawn afresh
//! for every gamete.

use rand::Rng;

use crate::base::{Allele, Genotype};

/// Draw the allele a parent with `genotype` transmits to one offspring.
#[inline]
pub fn random_allele<R: Rng + ?Sized>(genotype: Genotype, rng: &mut R) -> Allele {
    match genotype.fixed_allele() {
        Some(allele) => allele,
        None => {
            if rng.random::<f64>() < 0.5 {
                Allele::A
            } else {
                Allele::S
            }
        }
    }
}

/// Resolve an offspring genotype from its two parents' genotypes.
///
/// Parent 1 is sampled before parent 2 so a seeded generator always yields
/// the same sequence of draws.
pub fn resolve<R: Rng + ?Sized>(parent1: Genotype, parent2: Genotype, rng: &mut R) -> Genotype {
    let first = random_allele(parent1, rng);
    let second = random_allele(parent2, rng);
    Genotype::from_alleles(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_homozygotes_transmit_their_allele() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(random_allele(Genotype::AA, &mut rng), Allele::A);
            assert_eq!(random_allele(Genotype::SS, &mut rng), Allele::S);
        }
    }

    #[test]
    fn test_two_aa_parents_always_aa() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(resolve(Genotype::AA, Genotype::AA, &mut rng), Genotype::AA);
        }
    }

    #[test]
    fn test_ss_with_aa_always_as() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            assert_eq!(resolve(Genotype::SS, Genotype::AA, &mut rng), Genotype::AS);
            assert_eq!(resolve(Genotype::AA, Genotype::SS, &mut rng), Genotype::AS);
        }
    }

    #[test]
    fn test_two_ss_parents_always_ss() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert_eq!(resolve(Genotype::SS, Genotype::SS, &mut rng), Genotype::SS);
        }
    }

    #[test]
    fn test_carrier_cross_mendelian_ratio() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 40_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match resolve(Genotype::AS, Genotype::AS, &mut rng) {
                Genotype::AA => counts[0] += 1,
                Genotype::AS => counts[1] += 1,
                Genotype::SS => counts[2] += 1,
            }
        }
        // Expect 1:2:1
        let freq = |c: usize| c as f64 / n as f64;
        assert!((freq(counts[0]) - 0.25).abs() < 0.02);
        assert!((freq(counts[1]) - 0.50).abs() < 0.02);
        assert!((freq(counts[2]) - 0.25).abs() < 0.02);
    }

    #[test]
    fn test_carrier_allele_is_fresh_per_draw() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<Allele> = (0..200)
            .map(|_| random_allele(Genotype::AS, &mut rng))
            .collect();
        assert!(draws.contains(&Allele::A));
        assert!(draws.contains(&Allele::S));
    }
}
