use thiserror::Error;

/// Error returned when a string does not name one of AA, AS (or SA), SS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid genotype: '{0}' (expected AA, AS or SS)")]
pub struct InvalidGenotype(pub String);

/// Error returned when a model parameter is outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A probability or rate was not within `[0.0, 1.0]`.
    #[error("Invalid probability for {0}: {1} (must be between 0.0 and 1.0)")]
    InvalidProbability(&'static str, f64),

    /// A percentage was not within `[0, 100]`.
    #[error("Invalid percentage for {0}: {1} (must be between 0 and 100)")]
    InvalidPercentage(&'static str, u32),

    /// A count-like parameter had an unusable value.
    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidCount {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },
}

/// Validate that `value` is a probability, returning it unchanged.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::InvalidProbability(name, value))
    }
}

/// Errors that can occur during simulation building.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A required parameter is missing
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),

    /// An invalid parameter value was provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),
}

/// Broken accounting inside the population store.
///
/// These are never expected at runtime; seeing one means a stage updated the
/// live set without keeping the genotype counters in step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error(
        "Genotype counters out of sync: AA={healthy} AS={carrier} SS={sickle} but population size is {size}"
    )]
    CounterMismatch {
        healthy: usize,
        carrier: usize,
        sickle: usize,
        size: usize,
    },

    #[error("Population size {size} fell below floor {floor}")]
    BelowFloor { size: usize, floor: usize },

    #[error("Live slot index for individual {0} is stale")]
    StaleSlot(usize),
}

/// Errors raised while advancing a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Errors raised by the lifecycle controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// `reset` or `tick` was requested before any `start`.
    #[error("Simulation has not been started")]
    NotStarted,

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl From<BuilderError> for ControllerError {
    fn from(e: BuilderError) -> Self {
        Self::Simulation(SimulationError::Builder(e))
    }
}

/// Errors reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ParameterError),
}
