//! Error types shared by the engine and its collaborators.
//!
//! Two layers:
//!
//! - [`ConfigError`]: the engine was wired or parameterized incorrectly.
//!   Raised before (or at) the point of invocation and never retried.
//! - [`EvolveError`]: everything that can abort a run, including
//!   configuration errors, fitness contract violations and failures
//!   returned by pluggable collaborators.

use std::error::Error;

/// Invalid engine wiring or parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("no fitness function registered in the engine")]
    MissingFitness,
    #[error("population must not be empty")]
    EmptyPopulation,
    #[error("population size must be even, got {size}")]
    OddPopulationSize { size: usize },
    #[error("invalid scaling target `{0}`, expected `max` or `min`")]
    InvalidTarget(String),
    #[error("analysis interval must be at least 1")]
    InvalidInterval,
    #[error("decay factor must lie in (0, 1), got {0}")]
    InvalidDecay(f64),
    #[error("selective pressure adjustment must be finite, got {0}")]
    InvalidAdjustment(f64),
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("worker group must have at least one worker")]
    InvalidWorkerCount,
    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,
}

/// Any failure that aborts an evolution run.
#[derive(Debug, thiserror::Error)]
pub enum EvolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A fitness function produced a value that is not a finite real number.
    #[error("fitness value {value} is invalid")]
    InvalidFitness { value: f64 },

    /// Fitness scaling was evaluated before population statistics exist.
    #[error("population statistics are not available yet")]
    StatisticsUnavailable,

    #[error("merged offspring count {actual} does not match population size {expected}")]
    MergeSizeMismatch { expected: usize, actual: usize },

    #[error("worker group failure: {0}")]
    Coordinator(String),

    /// Failure raised by a pluggable collaborator (operator, hook, ...).
    #[error("{0}")]
    Operator(Box<dyn Error + Send + Sync>),
}

impl EvolveError {
    /// Wraps a collaborator failure.
    ///
    /// ```
    /// use u_evolve::EvolveError;
    ///
    /// let err = EvolveError::operator("mutation exploded");
    /// assert_eq!(err.to_string(), "mutation exploded");
    /// ```
    pub fn operator<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        EvolveError::Operator(err.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolveError>;
