//! Shared default values for simulation configuration.
//! These mirror the library defaults so `--help` shows the real values.

pub const CONFIG_FILE: &str = "sickle.json";

pub const POPULATION_SIZE: usize = 100;
pub const GENERATIONS: usize = 1000;
pub const SICKLE_START_PERCENT: u32 = 30;

// Evolution
pub const MUTATION_RATE: f64 = 0.005;
pub const REPRODUCTION_RATE: f64 = 0.02;
pub const MAX_BIRTHS_PER_TICK: usize = 5;
pub const DEATH_RATE: f64 = 0.01;

// Clock
pub const TICK_INTERVAL_MS: u64 = 100;
pub const REPORT_EVERY: usize = 10;

pub const LINEAGE_DEPTH: usize = 3;
