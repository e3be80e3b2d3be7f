//! Generational genetic-algorithm engine with pluggable operators.
//!
//! The engine runs a fixed number of generations over a population. Each
//! generation it selects parent pairs, crosses and mutates them into a new
//! population of the same size, keeps the previous best candidate
//! (elitism), refreshes population statistics and notifies analysis hooks.
//!
//! - **[`engine`]**: the loop itself, its configuration and the read-only
//!   views handed to collaborators.
//! - **[`population`]**: the population contract and [`VecPopulation`].
//! - **[`fitness`]**: fitness functions plus static and dynamic linear
//!   scaling.
//! - **[`operators`]**: selection, crossover and mutation traits with
//!   ready-made strategies.
//! - **[`analysis`]**: on-the-fly hooks fired at a generational cadence.
//! - **[`parallel`]**: splitting reproduction across cooperating workers.
//!
//! # Architecture
//!
//! The engine never inspects candidates. Everything it knows about them
//! comes through the fitness function and the three operator traits, so
//! any genome representation can be evolved.

pub mod analysis;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod operators;
pub mod parallel;
pub mod population;
pub mod random;

pub use engine::{Engine, EngineConfig, EngineView, EvolutionResult, GenerationContext};
pub use error::{ConfigError, EvolveError, Result};
pub use fitness::{
    BoundFitness, DynamicLinearScaling, FitnessFn, FitnessFunction, LinearScaling, Scaling,
    ScalingTarget,
};
pub use population::{Population, PopulationStats, ScoreFn, VecPopulation};
pub use random::create_rng;
