//! Capped, floor-respecting removal scan shared by mortality and drift.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::{Individual, IndividualId};
use crate::simulation::Population;

/// How many removals a single scan may perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Stop the scan after the first removal.
    FirstHit,
    /// Keep scanning until the cap is reached or the population runs out.
    #[default]
    UpToCap,
}

/// Walk the live population in store order, rolling `probability(ind)` for
/// each member and removing hits.
///
/// After a removal the swapped-in member is evaluated at the same index, so
/// nobody is skipped. The scan ends at the cap, at the floor, or (under
/// [`RemovalPolicy::FirstHit`]) after one removal.
pub(crate) fn cull<R, F>(
    population: &mut Population,
    cap: usize,
    policy: RemovalPolicy,
    rng: &mut R,
    mut probability: F,
) -> Vec<IndividualId>
where
    R: Rng + ?Sized,
    F: FnMut(&Individual) -> f64,
{
    let mut removed = Vec::new();
    let mut index = 0;

    while index < population.size() && removed.len() < cap {
        let Some(p) = population.get(index).map(&mut probability) else {
            break;
        };
        if rng.random::<f64>() >= p {
            index += 1;
            continue;
        }
        match population.remove_at(index) {
            Some(id) => removed.push(id),
            None => break,
        }
        if policy == RemovalPolicy::FirstHit {
            break;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Genotype;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population_of(n: usize, floor: usize) -> Population {
        let mut pop = Population::with_floor("cull", floor);
        for _ in 0..n {
            pop.add_founder(Genotype::AA);
        }
        pop
    }

    #[test]
    fn test_cap_bounds_removals() {
        let mut pop = population_of(100, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let removed = cull(&mut pop, 7, RemovalPolicy::UpToCap, &mut rng, |_| 1.0);
        assert_eq!(removed.len(), 7);
        assert_eq!(pop.size(), 93);
        assert!(pop.check_invariants().is_ok());
    }

    #[test]
    fn test_first_hit_stops_after_one() {
        let mut pop = population_of(100, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let removed = cull(&mut pop, 7, RemovalPolicy::FirstHit, &mut rng, |_| 1.0);
        assert_eq!(removed.len(), 1);
        assert_eq!(pop.size(), 99);
    }

    #[test]
    fn test_floor_stops_scan() {
        let mut pop = population_of(12, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let removed = cull(&mut pop, 50, RemovalPolicy::UpToCap, &mut rng, |_| 1.0);
        assert_eq!(removed.len(), 2);
        assert_eq!(pop.size(), 10);
    }

    #[test]
    fn test_zero_probability_removes_nothing() {
        let mut pop = population_of(40, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let removed = cull(&mut pop, 40, RemovalPolicy::UpToCap, &mut rng, |_| 0.0);
        assert!(removed.is_empty());
        assert_eq!(pop.size(), 40);
    }

    #[test]
    fn test_zero_cap_removes_nothing() {
        let mut pop = population_of(40, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let removed = cull(&mut pop, 0, RemovalPolicy::UpToCap, &mut rng, |_| 1.0);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_swapped_member_is_evaluated() {
        // Only the last founder is targeted; it gets swapped into slot 0 when
        // slot 0 is removed and must still be reachable.
        let mut pop = Population::with_floor("cull", 0);
        let first = pop.add_founder(Genotype::SS);
        pop.add_founder(Genotype::AA);
        let last = pop.add_founder(Genotype::SS);

        let mut rng = StdRng::seed_from_u64(1);
        let removed = cull(&mut pop, 10, RemovalPolicy::UpToCap, &mut rng, |ind| {
            if ind.genotype() == Genotype::SS {
                1.0
            } else {
                0.0
            }
        });
        assert_eq!(removed, vec![first, last]);
        assert_eq!(pop.counts().healthy, 1);
        assert_eq!(pop.size(), 1);
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&RemovalPolicy::FirstHit).unwrap();
        assert_eq!(json, "\"first_hit\"");
        assert_eq!(RemovalPolicy::default(), RemovalPolicy::UpToCap);
    }
}
