//! Append-only lineage arena.
//!
//! Every individual ever created gets a record here, addressed by its
//! [`IndividualId`]. The live population only holds handles into this arena,
//! so removing someone from the population never invalidates ancestry.

use serde::{Deserialize, Serialize};

use super::{Individual, IndividualId};
use crate::base::Genotype;

/// Arena of individual records forming the parent -> child DAG.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lineage {
    records: Vec<Individual>,
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of individuals ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.records.get(id.index())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: IndividualId) -> Option<&mut Individual> {
        self.records.get_mut(id.index())
    }

    /// Iterate over every record in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Individual> + '_ {
        self.records.iter()
    }

    /// Allocate a founder record.
    pub(crate) fn alloc_founder(&mut self, genotype: Genotype, generation: usize) -> IndividualId {
        let id = IndividualId::from_index(self.records.len());
        self.records
            .push(Individual::founder(id, genotype, generation));
        id
    }

    /// Allocate an offspring record and link it under both parents.
    ///
    /// Both parents must already exist in the arena; since the child is
    /// always allocated after them the graph stays acyclic.
    pub(crate) fn alloc_offspring(
        &mut self,
        parent1: IndividualId,
        parent2: IndividualId,
        genotype: Genotype,
        generation: usize,
    ) -> IndividualId {
        debug_assert!(parent1.index() < self.records.len());
        debug_assert!(parent2.index() < self.records.len());

        let id = IndividualId::from_index(self.records.len());
        self.records.push(Individual::offspring(
            id, genotype, parent1, parent2, generation,
        ));

        if let Some(p) = self.get_mut(parent1) {
            p.add_child(id);
        }
        // selfing lists the child once
        if parent2 != parent1 {
            if let Some(p) = self.get_mut(parent2) {
                p.add_child(id);
            }
        }
        id
    }

    /// Follow `parent1` links from `start` until a founder is reached.
    ///
    /// Only the first parent's side is walked, so the result is one valid
    /// founder among possibly many. Returns `None` if `start` is unknown.
    pub fn root_ancestor(&self, start: IndividualId) -> Option<IndividualId> {
        let mut current = self.get(start)?;
        while let Some(parent) = current.parent1() {
            current = self.get(parent)?;
        }
        Some(current.id())
    }

    /// Number of `parent1` steps between `id` and its root ancestor.
    pub fn depth(&self, id: IndividualId) -> Option<usize> {
        let mut current = self.get(id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent1() {
            current = self.get(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Count distinct descendants of `id` (children, grandchildren, ...).
    ///
    /// A child of two parents that both descend from `id` is counted once.
    pub fn descendant_count(&self, id: IndividualId) -> usize {
        let Some(root) = self.get(id) else {
            return 0;
        };

        let mut seen = vec![false; self.records.len()];
        let mut stack: Vec<IndividualId> = root.children().to_vec();
        let mut count = 0;

        while let Some(next) = stack.pop() {
            let Some(flag) = seen.get_mut(next.index()) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            count += 1;
            if let Some(record) = self.get(next) {
                stack.extend_from_slice(record.children());
            }
        }
        count
    }

    /// Build a display tree rooted at `id`, expanding at most `max_depth`
    /// levels of children.
    pub fn tree(&self, id: IndividualId, max_depth: usize) -> Option<LineageNode> {
        let record = self.get(id)?;
        let (children, truncated) = if max_depth == 0 {
            (Vec::new(), record.children().len())
        } else {
            let nodes = record
                .children()
                .iter()
                .filter_map(|&child| self.tree(child, max_depth - 1))
                .collect();
            (nodes, 0)
        };

        Some(LineageNode {
            id,
            genotype: record.genotype(),
            alive: record.is_alive(),
            children,
            truncated,
        })
    }
}

/// A node of a depth-limited lineage tree, used for text or UI display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageNode {
    pub id: IndividualId,
    pub genotype: Genotype,
    pub alive: bool,
    pub children: Vec<LineageNode>,
    /// Children not expanded because the depth limit was reached
    pub truncated: usize,
}

impl LineageNode {
    /// Render as an indented outline, one individual per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        let status = if self.alive { "" } else { " (dead)" };
        out.push_str(&format!(
            "{:width$}{} {}{}",
            "",
            self.id,
            self.genotype,
            status,
            width = indent * 2
        ));
        if self.truncated > 0 {
            out.push_str(&format!(" [+{} children]", self.truncated));
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(out, indent + 1);
        }
    }
}
