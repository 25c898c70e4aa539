//! Per-tick evolutionary stages.
//!
//! - **Inheritance**: Mendelian allele sampling from two parents
//! - **Mutation**: monotonic AA -> AS -> SS allele damage
//! - **Reproduction**: capped births with optional bias against SS parents
//! - **Mortality**: genotype-, age- and healthcare-weighted deaths
//! - **Drift**: genotype-blind culling scaled by population size

mod culling;
pub mod drift;
pub mod inheritance;
pub mod mortality;
pub mod mutation;
pub mod reproduction;

pub use culling::RemovalPolicy;
pub use drift::DriftModel;
pub use mortality::MortalityModel;
pub use mutation::{MutationEvent, MutationModel};
pub use reproduction::{MatingBias, ReproductionModel};
