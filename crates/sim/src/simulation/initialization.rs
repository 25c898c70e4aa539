//! Founder population generation.
//!
//! `sickle_start_percent` is the share of founders that carry at least one
//! `S` allele. Carriers are split evenly between AS and SS, so a 100% start
//! yields AS and SS in equal measure and never AA. Partial targets roll a
//! whole percentage point, so for an odd target SS takes the extra point.

use rand::Rng;

use crate::base::Genotype;
use crate::simulation::{InitializationConfig, Population};

/// Draw one founder genotype for a target sickle percentage.
///
/// Percentages above 100 are treated as 100.
pub fn found_genotype<R: Rng + ?Sized>(sickle_start_percent: u32, rng: &mut R) -> Genotype {
    match sickle_start_percent.min(100) {
        0 => Genotype::AA,
        100 => {
            if rng.random::<f64>() < 0.5 {
                Genotype::SS
            } else {
                Genotype::AS
            }
        }
        percent => {
            // integer roll in [0, 100); the SS half of an odd target rounds up
            let roll = rng.random_range(0..100u32);
            if (roll as f64) < percent as f64 / 2.0 {
                Genotype::SS
            } else if roll < percent {
                Genotype::AS
            } else {
                Genotype::AA
            }
        }
    }
}

/// Build a fresh population of `size` independent founders.
pub fn initialize<R: Rng + ?Sized>(
    config: &InitializationConfig,
    size: usize,
    floor: usize,
    rng: &mut R,
) -> Population {
    let mut population = Population::with_floor("pop0", floor);
    for _ in 0..size {
        population.add_founder(found_genotype(config.sickle_start_percent, rng));
    }
    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_percent_all_healthy() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert_eq!(found_genotype(0, &mut rng), Genotype::AA);
        }
    }

    #[test]
    fn test_full_percent_never_healthy() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws: Vec<Genotype> = (0..2000).map(|_| found_genotype(100, &mut rng)).collect();
        assert!(!draws.contains(&Genotype::AA));

        let ss = draws.iter().filter(|&&g| g == Genotype::SS).count() as f64 / 2000.0;
        assert!((ss - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_over_hundred_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            assert_ne!(found_genotype(250, &mut rng), Genotype::AA);
        }
    }

    #[test]
    fn test_intermediate_proportions() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let carriers = (0..n)
            .filter(|_| found_genotype(30, &mut rng) != Genotype::AA)
            .count() as f64
            / n as f64;
        assert!((carriers - 0.30).abs() < 0.02);
    }

    fn split(percent: u32, seed: u64) -> (f64, f64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = 200_000;
        let (mut ss, mut carrier) = (0usize, 0usize);
        for _ in 0..n {
            match found_genotype(percent, &mut rng) {
                Genotype::SS => ss += 1,
                Genotype::AS => carrier += 1,
                Genotype::AA => {}
            }
        }
        (ss as f64 / n as f64, carrier as f64 / n as f64)
    }

    #[test]
    fn test_one_percent_is_all_ss() {
        let (ss, carrier) = split(1, 11);
        assert_eq!(carrier, 0.0);
        assert!((ss - 0.01).abs() < 0.002);
    }

    #[test]
    fn test_odd_target_rounds_ss_up() {
        let (ss, carrier) = split(3, 12);
        assert!((ss - 0.02).abs() < 0.002);
        assert!((carrier - 0.01).abs() < 0.002);
    }

    #[test]
    fn test_initialize_population() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = InitializationConfig {
            sickle_start_percent: 0,
        };
        let pop = initialize(&config, 100, 10, &mut rng);
        assert_eq!(pop.size(), 100);
        assert_eq!(pop.counts().healthy, 100);
        assert_eq!(pop.floor(), 10);
        assert!(pop.iter().all(|ind| ind.is_founder()));
        assert!(pop.check_invariants().is_ok());
    }
}
