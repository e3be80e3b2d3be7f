//! Built-in selection strategies.
//!
//! All strategies **maximize** the fitness they are given. Pair them with
//! fitness scaling when the raw objective is a minimization.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::{Rng, RngCore};

use super::types::Selection;
use crate::error::{ConfigError, Result};
use crate::fitness::BoundFitness;

/// Tournament selection: pick `size` individuals at random, keep the best.
///
/// Higher `size` = stronger selection pressure.
///
/// # Complexity
/// O(size) fitness evaluations per parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    size: usize,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { size: 2 }
    }
}

impl TournamentSelection {
    pub fn new(size: usize) -> std::result::Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn pick<C>(
        &self,
        population: &[C],
        fitness: &BoundFitness<'_, C>,
        rng: &mut dyn RngCore,
    ) -> Result<usize> {
        let n = population.len();
        let mut best_idx = rng.random_range(0..n);
        let mut best = fitness.evaluate(&population[best_idx])?;
        for _ in 1..self.size {
            let idx = rng.random_range(0..n);
            let f = fitness.evaluate(&population[idx])?;
            if f > best {
                best_idx = idx;
                best = f;
            }
        }
        Ok(best_idx)
    }
}

impl<C: Clone + Send + Sync> Selection<C> for TournamentSelection {
    fn select(
        &self,
        population: &[C],
        fitness: &BoundFitness<'_, C>,
        rng: &mut dyn RngCore,
    ) -> Result<(C, C)> {
        ensure_not_empty(population)?;
        let father = self.pick(population, fitness, rng)?;
        let mother = self.pick(population, fitness, rng)?;
        Ok((population[father].clone(), population[mother].clone()))
    }
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Weights are `f_i - min(f) + epsilon`, so negative fitness values are
/// handled and the worst individual keeps a tiny chance.
///
/// **Warning**: Susceptible to super-individual dominance when fitness
/// variance is high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteWheelSelection;

impl<C: Clone + Send + Sync> Selection<C> for RouletteWheelSelection {
    fn select(
        &self,
        population: &[C],
        fitness: &BoundFitness<'_, C>,
        rng: &mut dyn RngCore,
    ) -> Result<(C, C)> {
        ensure_not_empty(population)?;
        let values = evaluate_all(population, fitness)?;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);

        let epsilon = 1e-10;
        let weights: Vec<f64> = values.iter().map(|&f| f - min + epsilon).collect();

        let father = spin(&weights, rng);
        let mother = spin(&weights, rng);
        Ok((population[father].clone(), population[mother].clone()))
    }
}

/// Linear ranking selection.
///
/// Individuals are sorted by fitness (worst first) and the `i`-th gets
/// weight `pmin + (pmax - pmin) * i / (n - 1)`. Selection depends only on
/// rank, which avoids the scaling problems of roulette wheel selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRankingSelection {
    pmin: f64,
    pmax: f64,
}

impl Default for LinearRankingSelection {
    fn default() -> Self {
        Self {
            pmin: 0.1,
            pmax: 0.9,
        }
    }
}

impl LinearRankingSelection {
    /// Creates a ranking with the worst weight `pmin` and best weight `pmax`.
    pub fn new(pmin: f64, pmax: f64) -> std::result::Result<Self, ConfigError> {
        check_probability("pmin", pmin)?;
        check_probability("pmax", pmax)?;
        Ok(Self { pmin, pmax })
    }

    fn weights(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut weights = vec![0.0; n];
        for (rank, &idx) in order.iter().enumerate() {
            weights[idx] = if n == 1 {
                self.pmax
            } else {
                self.pmin + (self.pmax - self.pmin) * rank as f64 / (n - 1) as f64
            };
        }
        weights
    }
}

impl<C: Clone + Send + Sync> Selection<C> for LinearRankingSelection {
    fn select(
        &self,
        population: &[C],
        fitness: &BoundFitness<'_, C>,
        rng: &mut dyn RngCore,
    ) -> Result<(C, C)> {
        ensure_not_empty(population)?;
        let values = evaluate_all(population, fitness)?;
        let weights = self.weights(&values);
        let father = spin(&weights, rng);
        let mother = spin(&weights, rng);
        Ok((population[father].clone(), population[mother].clone()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn ensure_not_empty<C>(population: &[C]) -> Result<()> {
    if population.is_empty() {
        return Err(ConfigError::EmptyPopulation.into());
    }
    Ok(())
}

fn evaluate_all<C>(population: &[C], fitness: &BoundFitness<'_, C>) -> Result<Vec<f64>> {
    population.iter().map(|c| fitness.evaluate(c)).collect()
}

pub(crate) fn check_probability(
    name: &'static str,
    value: f64,
) -> std::result::Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability { name, value });
    }
    Ok(())
}

/// Draws an index with probability proportional to `weights`.
fn spin(weights: &[f64], rng: &mut dyn RngCore) -> usize {
    let n = weights.len();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}
