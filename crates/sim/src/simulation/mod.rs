//! Simulation engine and population management.
//!
//! Re-exports
//!
//! - `Simulation`: the engine that runs the per-tick pipeline.
//! - `Population`: the live store plus lineage used during simulation.
//! - `SimulationBuilder`: fluent builder for constructing `Simulation`
//!   instances with defaults and validation.
//! - `SimulationController`: start/pause/reset facade for interactive clocks.

pub mod builder;
pub mod configs;
pub mod controller;
pub mod engine;
pub mod initialization;
pub mod population;
pub mod snapshot;

pub use builder::SimulationBuilder;
pub use configs::{
    Configuration, Environment, EvolutionConfig, ExecutionConfig, InitializationConfig,
    RegionPreset, DEFAULT_TICK_INTERVAL_MS, RESET_SICKLE_START_PERCENT,
};
pub use controller::{ControllerState, SimulationController, StartParams, TickObserver};
pub use engine::Simulation;
pub use initialization::{found_genotype, initialize};
pub use population::Population;
pub use snapshot::{AlleleTally, GenerationSnapshot, TickReport, TickStats};
