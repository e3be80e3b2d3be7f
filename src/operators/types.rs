//! Operator strategy contracts.
//!
//! The engine calls these without knowing their internals. Each call gets
//! the engine's RNG as `&mut dyn RngCore`, which keeps the traits object
//! safe so strategies can be swapped at runtime.

use rand::RngCore;

use crate::engine::GenerationContext;
use crate::error::Result;
use crate::fitness::BoundFitness;

/// Chooses two parents from the current population.
///
/// `fitness` is the engine's active fitness; higher is better.
pub trait Selection<C>: Send + Sync {
    fn select(
        &self,
        population: &[C],
        fitness: &BoundFitness<'_, C>,
        rng: &mut dyn RngCore,
    ) -> Result<(C, C)>;
}

/// Recombines two parents into two children.
pub trait Crossover<C>: Send + Sync {
    fn cross(&self, father: &C, mother: &C, rng: &mut dyn RngCore) -> Result<(C, C)>;
}

/// Perturbs one child.
///
/// `context` exposes the current generation and population statistics,
/// so mutation rates can adapt as evolution proceeds.
pub trait Mutation<C>: Send + Sync {
    fn mutate(&self, candidate: C, context: &GenerationContext, rng: &mut dyn RngCore)
        -> Result<C>;
}
