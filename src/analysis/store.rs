//! Fitness history recording.

use std::sync::{Arc, Mutex, MutexGuard};

use super::types::AnalysisHook;
use crate::engine::EngineView;
use crate::error::{ConfigError, Result};
use crate::population::Population;

/// One recorded generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessRecord {
    pub generation: usize,
    /// Original (unscaled) fitness of the best candidate.
    pub best_fitness: f64,
}

/// Shared read handle to the records of a [`FitnessStore`].
///
/// Stays valid after the store has been moved into an engine.
#[derive(Debug, Clone, Default)]
pub struct FitnessHistory {
    records: Arc<Mutex<Vec<FitnessRecord>>>,
}

impl FitnessHistory {
    fn lock(&self) -> MutexGuard<'_, Vec<FitnessRecord>> {
        // a poisoned lock still holds complete records
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of all records, in generation order.
    pub fn records(&self) -> Vec<FitnessRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Records the best original fitness every `interval` generations.
///
/// ```
/// use u_evolve::analysis::FitnessStore;
///
/// let store = FitnessStore::default();
/// let history = store.history();
/// // engine.register_hook(store)?; engine.run(50)?;
/// assert!(history.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FitnessStore {
    interval: usize,
    history: FitnessHistory,
}

impl Default for FitnessStore {
    fn default() -> Self {
        Self {
            interval: 1,
            history: FitnessHistory::default(),
        }
    }
}

impl FitnessStore {
    pub fn with_interval(interval: usize) -> std::result::Result<Self, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(Self {
            interval,
            ..Self::default()
        })
    }

    /// A handle that observes this store's records.
    pub fn history(&self) -> FitnessHistory {
        self.history.clone()
    }
}

impl<P: Population> AnalysisHook<P> for FitnessStore {
    fn interval(&self) -> usize {
        self.interval
    }

    fn setup(&mut self, _generations: usize, _engine: &EngineView<'_, P>) -> Result<()> {
        self.history.lock().clear();
        Ok(())
    }

    fn register_step(&mut self, generation: usize, engine: &EngineView<'_, P>) -> Result<()> {
        let best = engine.best()?;
        let best_fitness = engine.original_fitness_of(best)?;
        self.history.lock().push(FitnessRecord {
            generation,
            best_fitness,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_shared_with_clone() {
        let store = FitnessStore::default();
        let history = store.history();
        store.history.lock().push(FitnessRecord {
            generation: 0,
            best_fitness: 1.0,
        });
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].best_fitness, 1.0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(FitnessStore::with_interval(0).is_err());
        let store = FitnessStore::with_interval(3).unwrap();
        assert_eq!(AnalysisHook::<crate::VecPopulation<f64>>::interval(&store), 3);
    }
}
