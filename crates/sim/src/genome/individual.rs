use core::fmt;

use serde::{Deserialize, Serialize};

use crate::base::{Allele, Genotype};

/// Stable handle for an individual in the lineage arena.
///
/// Handles are dense indices handed out in creation order and are never
/// reused, so they stay valid after the individual leaves the live population.
/// They are as wide as the arena index, so an id can always address its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndividualId(usize);

impl IndividualId {
    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of this record in the lineage arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Genetic and lineage record for one person.
///
/// An `Individual` is either a founder (no parents) or the offspring of two
/// individuals that were alive when it was born. Genotype only changes
/// through mutation, and only in the AA -> AS -> SS direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    id: IndividualId,
    genotype: Genotype,
    /// Ticks survived since birth
    age: u32,
    /// `None` for founders
    parents: Option<[IndividualId; 2]>,
    /// Offspring in birth order
    children: Vec<IndividualId>,
    /// Generation in which this individual was created
    born: usize,
    /// Generation in which this individual was removed from the population
    died: Option<usize>,
}

impl Individual {
    pub(crate) fn founder(id: IndividualId, genotype: Genotype, born: usize) -> Self {
        Self {
            id,
            genotype,
            age: 0,
            parents: None,
            children: Vec::new(),
            born,
            died: None,
        }
    }

    pub(crate) fn offspring(
        id: IndividualId,
        genotype: Genotype,
        parent1: IndividualId,
        parent2: IndividualId,
        born: usize,
    ) -> Self {
        Self {
            id,
            genotype,
            age: 0,
            parents: Some([parent1, parent2]),
            children: Vec::new(),
            born,
            died: None,
        }
    }

    #[inline]
    pub fn id(&self) -> IndividualId {
        self.id
    }

    #[inline]
    pub fn genotype(&self) -> Genotype {
        self.genotype
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[inline]
    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }

    #[inline]
    pub fn parent1(&self) -> Option<IndividualId> {
        self.parents.map(|[p1, _]| p1)
    }

    #[inline]
    pub fn parent2(&self) -> Option<IndividualId> {
        self.parents.map(|[_, p2]| p2)
    }

    #[inline]
    pub fn parents(&self) -> Option<[IndividualId; 2]> {
        self.parents
    }

    #[inline]
    pub fn children(&self) -> &[IndividualId] {
        &self.children
    }

    #[inline]
    pub fn born(&self) -> usize {
        self.born
    }

    #[inline]
    pub fn died(&self) -> Option<usize> {
        self.died
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.died.is_none()
    }

    /// Alleles carried, in canonical order.
    #[inline]
    pub fn alleles(&self) -> [Allele; 2] {
        self.genotype.alleles()
    }

    #[inline]
    pub(crate) fn increment_age(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    /// Apply one step of allele damage, returning the new genotype.
    pub(crate) fn mutate(&mut self) -> Option<Genotype> {
        let next = self.genotype.mutated()?;
        self.genotype = next;
        Some(next)
    }

    pub(crate) fn add_child(&mut self, child: IndividualId) {
        self.children.push(child);
    }

    pub(crate) fn mark_dead(&mut self, generation: usize) {
        self.died = Some(generation);
    }
}
