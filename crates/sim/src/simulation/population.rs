//! Population management and operations.
//!
//! [`Population`] is the live-membership view over the append-only
//! [`Lineage`] arena. It owns the genotype counters and keeps them in step
//! with every birth, mutation and removal, and it refuses removals that would
//! shrink the population below its floor.

use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use crate::base::{Genotype, GenotypeCounts, POPULATION_FLOOR};
use crate::errors::InvariantViolation;
use crate::genome::{Individual, IndividualId, Lineage};
use crate::simulation::GenerationSnapshot;

/// The live set of individuals plus the lineage of everyone who ever lived.
#[derive(Debug, Clone)]
pub struct Population {
    /// Population ID
    id: Arc<str>,
    /// Generation counter
    generation: usize,
    /// Every individual ever created
    lineage: Lineage,
    /// Live handles in dense iteration order
    live: Vec<IndividualId>,
    /// Dense index of each lineage record in `live`, `None` once removed
    slots: Vec<Option<usize>>,
    /// Incremental genotype tallies over `live`
    counts: GenotypeCounts,
    /// Minimum size enforced on removal
    floor: usize,
}

impl Population {
    /// Create an empty population with the default floor.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self::with_floor(id, POPULATION_FLOOR)
    }

    /// Create an empty population that refuses removals at or below `floor`.
    pub fn with_floor(id: impl Into<Arc<str>>, floor: usize) -> Self {
        Self {
            id: id.into(),
            generation: 0,
            lineage: Lineage::new(),
            live: Vec::new(),
            slots: Vec::new(),
            counts: GenotypeCounts::default(),
            floor,
        }
    }

    /// Get population ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Increment the generation counter.
    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    /// Number of live individuals.
    #[inline]
    pub fn size(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Current genotype counters.
    #[inline]
    pub fn counts(&self) -> GenotypeCounts {
        self.counts
    }

    /// The full lineage arena, including individuals no longer alive.
    #[inline]
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    /// Live handles in store order.
    #[inline]
    pub fn ids(&self) -> &[IndividualId] {
        &self.live
    }

    /// Live individual at dense position `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Individual> {
        let id = *self.live.get(index)?;
        self.lineage.get(id)
    }

    /// Look up any individual, alive or not.
    #[inline]
    pub fn individual(&self, id: IndividualId) -> Option<&Individual> {
        self.lineage.get(id)
    }

    /// Dense position of a live individual.
    #[inline]
    pub fn index_of(&self, id: IndividualId) -> Option<usize> {
        self.slots.get(id.index()).copied().flatten()
    }

    #[inline]
    pub fn contains(&self, id: IndividualId) -> bool {
        self.index_of(id).is_some()
    }

    /// Iterate over live individuals in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Individual> + '_ {
        self.live.iter().filter_map(|&id| self.lineage.get(id))
    }

    /// Uniformly pick a live position.
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.live.is_empty() {
            None
        } else {
            Some(rng.random_range(0..self.live.len()))
        }
    }

    /// Add a founder with the given genotype.
    pub fn add_founder(&mut self, genotype: Genotype) -> IndividualId {
        let id = self.lineage.alloc_founder(genotype, self.generation);
        self.push_live(id, genotype);
        id
    }

    /// Add the offspring of two live parents and record the lineage edges.
    ///
    /// Returns `None` if either parent is not currently alive.
    pub fn add_offspring(
        &mut self,
        parent1: IndividualId,
        parent2: IndividualId,
        genotype: Genotype,
    ) -> Option<IndividualId> {
        if !self.contains(parent1) || !self.contains(parent2) {
            return None;
        }
        let id = self
            .lineage
            .alloc_offspring(parent1, parent2, genotype, self.generation);
        self.push_live(id, genotype);
        Some(id)
    }

    /// Age every live individual by one tick.
    pub fn age_all(&mut self) {
        for &id in &self.live {
            if let Some(ind) = self.lineage.get_mut(id) {
                ind.increment_age();
            }
        }
    }

    /// Apply one step of allele damage to the individual at `index`.
    ///
    /// Returns the handle and the old/new genotypes, or `None` if the
    /// individual is already SS (or `index` is out of range).
    pub fn mutate_at(&mut self, index: usize) -> Option<(IndividualId, Genotype, Genotype)> {
        let id = *self.live.get(index)?;
        let ind = self.lineage.get_mut(id)?;
        let from = ind.genotype();
        let to = ind.mutate()?;
        self.counts.transfer(from, to);
        Some((id, from, to))
    }

    /// Whether one more removal would be accepted.
    #[inline]
    pub fn can_remove(&self) -> bool {
        self.live.len() > self.floor
    }

    /// Remove the live individual at `index` by swapping in the last one.
    ///
    /// Store order is not preserved. Returns `None` without touching
    /// anything when the population is at its floor.
    pub fn remove_at(&mut self, index: usize) -> Option<IndividualId> {
        if index >= self.live.len() {
            return None;
        }
        if !self.can_remove() {
            trace!(
                size = self.live.len(),
                floor = self.floor,
                "removal refused at population floor"
            );
            return None;
        }

        let id = self.live.swap_remove(index);
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = None;
        }
        if index < self.live.len() {
            let moved = self.live[index];
            if let Some(slot) = self.slots.get_mut(moved.index()) {
                *slot = Some(index);
            }
        }

        let generation = self.generation;
        if let Some(ind) = self.lineage.get_mut(id) {
            self.counts.remove(ind.genotype());
            ind.mark_dead(generation);
        }
        Some(id)
    }

    /// Remove a live individual by handle.
    pub fn remove(&mut self, id: IndividualId) -> Option<IndividualId> {
        let index = self.index_of(id)?;
        self.remove_at(index)
    }

    /// A founder reached by walking `parent1` links up from the first live
    /// individual.
    pub fn root_ancestor(&self) -> Option<IndividualId> {
        let start = *self.live.first()?;
        self.lineage.root_ancestor(start)
    }

    /// Immutable copy of the current live individuals.
    pub fn snapshot(&self) -> GenerationSnapshot {
        GenerationSnapshot::new(self.generation, self.iter().cloned().collect())
    }

    /// Verify the accounting invariants by full scan.
    ///
    /// Checks that the counters match both the live size and a recount of
    /// genotypes, that the size respects the floor, and that every live
    /// handle points back at its own slot.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let size = self.live.len();
        let mismatch = InvariantViolation::CounterMismatch {
            healthy: self.counts.healthy,
            carrier: self.counts.carrier,
            sickle: self.counts.sickle,
            size,
        };

        if self.counts.total() != size {
            return Err(mismatch);
        }
        if GenotypeCounts::tally(self.iter().map(Individual::genotype)) != self.counts {
            return Err(mismatch);
        }
        if size < self.floor {
            return Err(InvariantViolation::BelowFloor {
                size,
                floor: self.floor,
            });
        }
        for (index, id) in self.live.iter().enumerate() {
            if self.index_of(*id) != Some(index) {
                return Err(InvariantViolation::StaleSlot(id.index()));
            }
        }
        Ok(())
    }

    fn push_live(&mut self, id: IndividualId, genotype: Genotype) {
        let index = self.live.len();
        self.live.push(id);
        if self.slots.len() <= id.index() {
            self.slots.resize(id.index() + 1, None);
        }
        self.slots[id.index()] = Some(index);
        self.counts.add(genotype);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_population(genotypes: &[Genotype], floor: usize) -> Population {
        let mut pop = Population::with_floor("pop1", floor);
        for &g in genotypes {
            pop.add_founder(g);
        }
        pop
    }

    #[test]
    fn test_population_new() {
        let pop = Population::new("pop1");
        assert_eq!(pop.size(), 0);
        assert!(pop.is_empty());
        assert_eq!(pop.generation(), 0);
        assert_eq!(pop.id(), "pop1");
        assert_eq!(pop.floor(), POPULATION_FLOOR);
    }

    #[test]
    fn test_population_increment_generation() {
        let mut pop = Population::new("pop1");
        pop.increment_generation();
        pop.increment_generation();
        assert_eq!(pop.generation(), 2);
    }

    #[test]
    fn test_add_founders_updates_counts() {
        let pop = create_test_population(
            &[Genotype::AA, Genotype::AS, Genotype::AS, Genotype::SS],
            0,
        );
        assert_eq!(pop.size(), 4);
        assert_eq!(pop.counts(), GenotypeCounts::new(1, 2, 1));
        assert!(pop.check_invariants().is_ok());
    }

    #[test]
    fn test_add_offspring_links_parents() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::SS], 0);
        let [p1, p2] = [pop.ids()[0], pop.ids()[1]];
        let child = pop.add_offspring(p1, p2, Genotype::AS).unwrap();

        assert_eq!(pop.size(), 3);
        assert_eq!(pop.counts(), GenotypeCounts::new(1, 1, 1));
        assert_eq!(pop.individual(p1).unwrap().children(), &[child]);
        assert_eq!(pop.individual(p2).unwrap().children(), &[child]);
        assert_eq!(pop.individual(child).unwrap().parents(), Some([p1, p2]));
    }

    #[test]
    fn test_add_offspring_requires_live_parents() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::AA], 0);
        let [p1, p2] = [pop.ids()[0], pop.ids()[1]];
        pop.remove(p2).unwrap();
        assert_eq!(pop.add_offspring(p1, p2, Genotype::AA), None);
        assert_eq!(pop.size(), 1);
    }

    #[test]
    fn test_remove_at_swaps_last_into_place() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::AS, Genotype::SS], 0);
        let ids = pop.ids().to_vec();

        let removed = pop.remove_at(0).unwrap();
        assert_eq!(removed, ids[0]);
        assert_eq!(pop.ids(), &[ids[2], ids[1]]);
        assert_eq!(pop.index_of(ids[2]), Some(0));
        assert_eq!(pop.index_of(ids[0]), None);
        assert_eq!(pop.counts(), GenotypeCounts::new(0, 1, 1));
        assert!(!pop.individual(ids[0]).unwrap().is_alive());
        assert!(pop.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_refused_at_floor() {
        let mut pop = create_test_population(&[Genotype::AA; 10], 10);
        assert!(!pop.can_remove());
        assert_eq!(pop.remove_at(0), None);
        assert_eq!(pop.size(), 10);
        assert_eq!(pop.counts().healthy, 10);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut pop = create_test_population(&[Genotype::AA; 3], 0);
        assert_eq!(pop.remove_at(3), None);
        assert_eq!(pop.size(), 3);
    }

    #[test]
    fn test_mutate_at_moves_counters() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::SS], 0);
        let (id, from, to) = pop.mutate_at(0).unwrap();
        assert_eq!(id, pop.ids()[0]);
        assert_eq!((from, to), (Genotype::AA, Genotype::AS));
        assert_eq!(pop.counts(), GenotypeCounts::new(0, 1, 1));

        // SS has nowhere to go
        assert_eq!(pop.mutate_at(1), None);
        assert_eq!(pop.counts(), GenotypeCounts::new(0, 1, 1));
    }

    #[test]
    fn test_age_all() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::AS], 0);
        pop.age_all();
        pop.age_all();
        assert!(pop.iter().all(|ind| ind.age() == 2));
    }

    #[test]
    fn test_root_ancestor_from_first_live() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::AS], 0);
        let [a, b] = [pop.ids()[0], pop.ids()[1]];
        let c = pop.add_offspring(b, a, Genotype::AS).unwrap();
        pop.remove(a).unwrap();
        pop.remove(b).unwrap();

        assert_eq!(pop.ids(), &[c]);
        assert_eq!(pop.root_ancestor(), Some(b));
    }

    #[test]
    fn test_root_ancestor_empty() {
        let pop = Population::new("empty");
        assert_eq!(pop.root_ancestor(), None);
    }

    #[test]
    fn test_check_invariants_below_floor() {
        let pop = create_test_population(&[Genotype::AA; 3], 10);
        assert_eq!(
            pop.check_invariants(),
            Err(InvariantViolation::BelowFloor { size: 3, floor: 10 })
        );
    }

    #[test]
    fn test_snapshot_copies_live_members() {
        let mut pop = create_test_population(&[Genotype::AA, Genotype::SS, Genotype::AS], 0);
        pop.remove_at(1).unwrap();
        let snapshot = pop.snapshot();
        assert_eq!(snapshot.size(), 2);
        assert_eq!(snapshot.generation(), 0);
    }
}
