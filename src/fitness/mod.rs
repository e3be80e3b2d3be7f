//! Fitness functions and fitness scaling.
//!
//! The engine holds two fitness functions built from these types:
//!
//! - the **original** one, unscaled, used for population statistics;
//! - the **active** one, possibly scaled, used for selection and elitism.
//!
//! Scaling never feeds back into its own basis: statistics are always
//! computed with the original function.

mod scaling;
mod types;

pub use scaling::{DynamicLinearScaling, LinearScaling, Scaling, ScalingTarget};
pub use types::{BoundFitness, FitnessFn, FitnessFunction};
