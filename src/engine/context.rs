//! Read-only views of engine state handed to collaborators.

use crate::error::Result;
use crate::fitness::FitnessFunction;
use crate::population::{Population, PopulationStats};

/// Generation-dependent state visible to scaling, mutation and hooks.
///
/// `generation` is `None` while the engine is not running. `stats` is the
/// reduction of the original fitness over the population as of the most
/// recently completed generation (or the initial population before
/// generation 0 finishes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationContext {
    pub generation: Option<usize>,
    pub stats: Option<PopulationStats>,
}

impl GenerationContext {
    pub fn new(generation: Option<usize>, stats: Option<PopulationStats>) -> Self {
        Self { generation, stats }
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.generation.is_some()
    }

    pub fn fmax(&self) -> Option<f64> {
        self.stats.map(|s| s.max)
    }

    pub fn fmin(&self) -> Option<f64> {
        self.stats.map(|s| s.min)
    }

    pub fn fmean(&self) -> Option<f64> {
        self.stats.map(|s| s.mean)
    }
}

/// Borrowed snapshot of an engine, passed to analysis hooks.
pub struct EngineView<'a, P: Population> {
    pub population: &'a P,
    pub context: &'a GenerationContext,
    pub fitness: &'a FitnessFunction<P::Candidate>,
    pub original_fitness: &'a FitnessFunction<P::Candidate>,
}

impl<'a, P: Population> EngineView<'a, P> {
    /// Active (possibly scaled) fitness of a candidate.
    pub fn fitness_of(&self, candidate: &P::Candidate) -> Result<f64> {
        self.fitness.evaluate(candidate, self.context)
    }

    /// Original (unscaled) fitness of a candidate.
    pub fn original_fitness_of(&self, candidate: &P::Candidate) -> Result<f64> {
        self.original_fitness.evaluate(candidate, self.context)
    }

    /// Best candidate under the active fitness.
    pub fn best(&self) -> Result<&'a P::Candidate> {
        let fitness = self.fitness;
        let context = self.context;
        self.population.best(&|c| fitness.evaluate(c, context))
    }
}
