//! Population collaborator contract and a vector-backed reference container.
//!
//! The engine never inspects candidates. It only needs an ordered sequence
//! it can read, replace wholesale, and reduce under a scoring function.

use crate::error::{ConfigError, Result};
use rand::Rng;

/// A scoring function over candidates, as handed to population reductions.
pub type ScoreFn<'a, C> = dyn Fn(&C) -> Result<f64> + Sync + 'a;

/// Scalar reductions of the original fitness over a population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationStats {
    /// Largest fitness value (`fmax`).
    pub max: f64,
    /// Smallest fitness value (`fmin`).
    pub min: f64,
    /// Arithmetic mean of fitness values (`fmean`).
    pub mean: f64,
}

impl PopulationStats {
    /// Reduces a slice of fitness values.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { max, min, mean })
    }
}

/// An ordered collection of candidates evolved by the engine.
///
/// Implementors provide storage; reductions have default implementations
/// built on [`fitness_values`](Population::fitness_values). Higher scores
/// are better.
pub trait Population {
    /// The candidate type. Opaque to the engine.
    type Candidate: Clone + Send + Sync;

    /// Current individuals, in order.
    fn individuals(&self) -> &[Self::Candidate];

    /// Replaces all individuals in one assignment.
    fn set_individuals(&mut self, individuals: Vec<Self::Candidate>);

    /// Number of individuals.
    fn size(&self) -> usize {
        self.individuals().len()
    }

    /// Scores every individual, preserving order.
    fn fitness_values(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<Vec<f64>> {
        self.individuals().iter().map(|c| fitness(c)).collect()
    }

    /// Largest score in the population.
    fn max(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<f64> {
        Ok(self.stats(fitness)?.max)
    }

    /// Smallest score in the population.
    fn min(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<f64> {
        Ok(self.stats(fitness)?.min)
    }

    /// Mean score of the population.
    fn mean(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<f64> {
        Ok(self.stats(fitness)?.mean)
    }

    /// `max`, `min` and `mean` in a single pass of evaluations.
    fn stats(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<PopulationStats> {
        let values = self.fitness_values(fitness)?;
        PopulationStats::from_values(&values).ok_or_else(|| ConfigError::EmptyPopulation.into())
    }

    /// The highest-scoring individual. Ties resolve to the lowest index.
    fn best(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<&Self::Candidate> {
        let values = self.fitness_values(fitness)?;
        let idx = extreme_index(&values, |a, b| a > b).ok_or(ConfigError::EmptyPopulation)?;
        Ok(&self.individuals()[idx])
    }

    /// The lowest-scoring individual. Ties resolve to the lowest index.
    fn worst(&self, fitness: &ScoreFn<'_, Self::Candidate>) -> Result<&Self::Candidate> {
        let values = self.fitness_values(fitness)?;
        let idx = extreme_index(&values, |a, b| a < b).ok_or(ConfigError::EmptyPopulation)?;
        Ok(&self.individuals()[idx])
    }
}

/// Index of the first value that `wins` against every other.
fn extreme_index(values: &[f64], wins: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut iter = values.iter().enumerate();
    let (mut best_idx, mut best) = iter.next().map(|(i, &v)| (i, v))?;
    for (i, &v) in iter {
        if wins(v, best) {
            best_idx = i;
            best = v;
        }
    }
    Some(best_idx)
}

/// A population stored in a `Vec`.
///
/// # Examples
///
/// ```
/// use u_evolve::{Population, VecPopulation};
///
/// let pop = VecPopulation::new(vec![1.0_f64, 4.0, 2.5]);
/// let best = pop.best(&|x: &f64| -> u_evolve::Result<f64> { Ok(*x) }).unwrap();
/// assert_eq!(*best, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct VecPopulation<C> {
    individuals: Vec<C>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<C: Clone + Send + Sync> VecPopulation<C> {
    /// Wraps existing individuals.
    pub fn new(individuals: Vec<C>) -> Self {
        Self {
            individuals,
            parallel: false,
        }
    }

    /// Creates `size` individuals with `factory`.
    pub fn generate<R, F>(size: usize, rng: &mut R, mut factory: F) -> Self
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> C,
    {
        Self::new((0..size).map(|_| factory(rng)).collect())
    }

    /// Evaluates fitness values with rayon when the `parallel` feature is on.
    ///
    /// Without the feature the flag is accepted and evaluation stays sequential.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Consumes the population, returning its individuals.
    pub fn into_individuals(self) -> Vec<C> {
        self.individuals
    }
}

impl<C: Clone + Send + Sync> Population for VecPopulation<C> {
    type Candidate = C;

    fn individuals(&self) -> &[C] {
        &self.individuals
    }

    fn set_individuals(&mut self, individuals: Vec<C>) {
        self.individuals = individuals;
    }

    fn fitness_values(&self, fitness: &ScoreFn<'_, C>) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            use rayon::prelude::*;
            return self.individuals.par_iter().map(|c| fitness(c)).collect();
        }

        self.individuals.iter().map(|c| fitness(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolveError;
    use crate::random::create_rng;

    fn identity(x: &f64) -> Result<f64> {
        Ok(*x)
    }

    #[test]
    fn test_reductions() {
        let pop = VecPopulation::new(vec![3.0, -1.0, 7.0, 3.0]);
        assert_eq!(pop.max(&identity).unwrap(), 7.0);
        assert_eq!(pop.min(&identity).unwrap(), -1.0);
        assert!((pop.mean(&identity).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(pop.size(), 4);
    }

    #[test]
    fn test_best_and_worst_ties_take_first() {
        let pop = VecPopulation::new(vec![(0, 5.0), (1, 9.0), (2, 9.0), (3, 1.0), (4, 1.0)]);
        let score = |c: &(usize, f64)| -> Result<f64> { Ok(c.1) };
        assert_eq!(pop.best(&score).unwrap().0, 1);
        assert_eq!(pop.worst(&score).unwrap().0, 3);
    }

    #[test]
    fn test_empty_population_errors() {
        let pop: VecPopulation<f64> = VecPopulation::new(vec![]);
        assert!(matches!(
            pop.stats(&identity),
            Err(EvolveError::Config(ConfigError::EmptyPopulation))
        ));
        assert!(pop.best(&identity).is_err());
    }

    #[test]
    fn test_scoring_error_propagates() {
        let pop = VecPopulation::new(vec![1.0, 2.0]);
        let failing = |_: &f64| -> Result<f64> { Err(EvolveError::InvalidFitness { value: f64::NAN }) };
        assert!(matches!(
            pop.max(&failing),
            Err(EvolveError::InvalidFitness { .. })
        ));
    }

    #[test]
    fn test_set_individuals_replaces_all() {
        let mut pop = VecPopulation::new(vec![1.0, 2.0]);
        pop.set_individuals(vec![5.0, 6.0]);
        assert_eq!(pop.individuals(), &[5.0, 6.0]);
    }

    #[test]
    fn test_generate() {
        let mut rng = create_rng(42);
        let pop = VecPopulation::generate(6, &mut rng, |r| r.random_range(0.0..1.0));
        assert_eq!(pop.size(), 6);
        assert!(pop.individuals().iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let values: Vec<f64> = (0..64).map(|i| i as f64 * 0.5).collect();
        let seq = VecPopulation::new(values.clone());
        let par = VecPopulation::new(values).with_parallel(true);
        assert_eq!(
            seq.fitness_values(&identity).unwrap(),
            par.fitness_values(&identity).unwrap()
        );
    }
}
