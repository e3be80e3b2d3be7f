//! Progress reporting through the `log` facade.

use log::info;

use super::types::AnalysisHook;
use crate::engine::EngineView;
use crate::error::{ConfigError, Result};
use crate::population::Population;

/// Logs the best candidate's fitness every `interval` generations.
///
/// Output goes to the `log` facade at `info` level; nothing is printed
/// unless the application installs a logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutput {
    interval: usize,
    generations: usize,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self {
            interval: 1,
            generations: 0,
        }
    }
}

impl ConsoleOutput {
    pub fn with_interval(interval: usize) -> std::result::Result<Self, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(Self {
            interval,
            ..Self::default()
        })
    }
}

impl<P: Population> AnalysisHook<P> for ConsoleOutput {
    fn interval(&self) -> usize {
        self.interval
    }

    fn setup(&mut self, generations: usize, engine: &EngineView<'_, P>) -> Result<()> {
        self.generations = generations;
        info!(
            "Evolving {} candidates for {} generations",
            engine.population.size(),
            generations
        );
        Ok(())
    }

    fn register_step(&mut self, generation: usize, engine: &EngineView<'_, P>) -> Result<()> {
        let best = engine.best()?;
        let raw = engine.original_fitness_of(best)?;
        let scaled = engine.fitness_of(best)?;
        info!(
            "Generation {}/{}: best fitness {:.6} (scaled {:.6}), mean {:.6}",
            generation + 1,
            self.generations,
            raw,
            scaled,
            engine.context.fmean().unwrap_or(f64::NAN)
        );
        Ok(())
    }

    fn finalize(&mut self, engine: &EngineView<'_, P>) -> Result<()> {
        let best = engine.best()?;
        info!(
            "Evolution finished: best fitness {:.6}",
            engine.original_fitness_of(best)?
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval() {
        let hook = ConsoleOutput::with_interval(5).unwrap();
        assert_eq!(AnalysisHook::<crate::VecPopulation<f64>>::interval(&hook), 5);
        assert_eq!(
            ConsoleOutput::with_interval(0),
            Err(ConfigError::InvalidInterval)
        );
    }
}
