//! Analysis hook contract.

use crate::engine::EngineView;
use crate::error::Result;
use crate::population::Population;

/// An observer invoked by the engine at a generational cadence.
///
/// The engine owns *when* hooks fire:
///
/// 1. [`setup`](AnalysisHook::setup) once before generation 0;
/// 2. [`register_step`](AnalysisHook::register_step) after every generation
///    `g` with `g % interval() == 0`, once the new population and its
///    statistics are in place;
/// 3. [`finalize`](AnalysisHook::finalize) exactly once when the run ends,
///    whether it completed or failed.
///
/// Hooks fire in registration order.
pub trait AnalysisHook<P: Population> {
    /// Generation cadence. Must be at least 1.
    fn interval(&self) -> usize {
        1
    }

    fn setup(&mut self, _generations: usize, _engine: &EngineView<'_, P>) -> Result<()> {
        Ok(())
    }

    fn register_step(&mut self, generation: usize, engine: &EngineView<'_, P>) -> Result<()>;

    fn finalize(&mut self, _engine: &EngineView<'_, P>) -> Result<()> {
        Ok(())
    }
}
