//! # Simulation Crate
//!
//! The `sickle-sim` crate provides the core logic for the sickle-cell
//! population simulation. It includes modules for the single-locus genotype
//! vocabulary, individuals and their lineage, the per-tick evolutionary
//! stages (mutation, reproduction, mortality, drift), and the simulation
//! engine with its lifecycle controller.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod simulation;

pub use base::{Allele, Genotype, GenotypeCounts};
