//! Generational evolution engine.
//!
//! [`Engine`] owns the loop. Per generation it:
//!
//! 1. captures the best candidate of the current population (active fitness);
//! 2. performs its share of reproduction units (select → cross → mutate);
//! 3. merges offspring from every worker, rank order then local order;
//! 4. puts the captured best at index 0 (elitism);
//! 5. replaces the population, recomputes statistics, and fires hooks.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems" (elitist strategy)

mod config;
mod context;
mod runner;

pub use config::EngineConfig;
pub use context::{EngineView, GenerationContext};
pub use runner::{Engine, EvolutionResult};
