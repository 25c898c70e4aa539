//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use sickle_sim::prelude::*;
//!
//! let mut sim = SimulationBuilder::new()
//!     .population_size(100)
//!     .generations(10)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let report = sim.step().unwrap();
//! assert_eq!(report.generation, 1);
//! ```

pub use crate::base::{Allele, Genotype, GenotypeCounts};
pub use crate::errors::{BuilderError, ControllerError, SimulationError};
pub use crate::evolution::{
    DriftModel, MatingBias, MortalityModel, MutationModel, RemovalPolicy, ReproductionModel,
};
pub use crate::genome::{Individual, IndividualId, Lineage};
pub use crate::simulation::{
    Configuration, Population, RegionPreset, Simulation, SimulationBuilder,
    SimulationController, StartParams, TickObserver, TickReport, TickStats,
};
