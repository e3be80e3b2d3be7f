//! Evolution loop execution.

use log::{debug, error, info, warn};
use rand::rngs::StdRng;

use super::config::EngineConfig;
use super::context::{EngineView, GenerationContext};
use crate::analysis::AnalysisHook;
use crate::error::{ConfigError, EvolveError, Result};
use crate::fitness::{DynamicLinearScaling, FitnessFn, FitnessFunction, LinearScaling, Scaling};
use crate::operators::{Crossover, Mutation, Selection};
use crate::parallel::{Coordinator, SingleProcess};
use crate::population::{Population, PopulationStats};
use crate::random::create_rng;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<C> {
    /// Best candidate of the final population under the active fitness.
    pub best: C,

    /// Original (unscaled) fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Statistics of the final population.
    pub stats: PopulationStats,
}

/// The generational evolution engine.
///
/// # Usage
///
/// ```
/// use u_evolve::operators::{FlipBitMutation, TournamentSelection, UniformCrossover};
/// use u_evolve::{create_rng, Engine, EngineConfig, VecPopulation};
/// use rand::Rng;
///
/// let mut rng = create_rng(1);
/// let population = VecPopulation::generate(20, &mut rng, |r| {
///     (0..16).map(|_| r.random_bool(0.5)).collect::<Vec<bool>>()
/// });
///
/// let mut engine = Engine::new(
///     population,
///     TournamentSelection::default(),
///     UniformCrossover::default(),
///     FlipBitMutation::new(0.05).unwrap(),
/// )
/// .unwrap()
/// .with_config(EngineConfig::default().with_seed(42))
/// .with_fitness(|bits: &Vec<bool>| bits.iter().filter(|&&b| b).count() as f64);
///
/// let result = engine.run(30).unwrap();
/// assert!(result.best_fitness >= 8.0);
/// ```
pub struct Engine<P: Population> {
    population: P,
    selection: Box<dyn Selection<P::Candidate>>,
    crossover: Box<dyn Crossover<P::Candidate>>,
    mutation: Box<dyn Mutation<P::Candidate>>,
    coordinator: Box<dyn Coordinator<P::Candidate>>,
    analysis: Vec<Box<dyn AnalysisHook<P>>>,
    fitness: Option<FitnessFunction<P::Candidate>>,
    original_fitness: Option<FitnessFunction<P::Candidate>>,
    context: GenerationContext,
    config: EngineConfig,
    rng: StdRng,
}

impl<P: Population> Engine<P> {
    /// Creates an engine with a single-process coordinator and no fitness.
    ///
    /// Fails if the population is empty.
    pub fn new<S, X, M>(population: P, selection: S, crossover: X, mutation: M) -> Result<Self>
    where
        S: Selection<P::Candidate> + 'static,
        X: Crossover<P::Candidate> + 'static,
        M: Mutation<P::Candidate> + 'static,
    {
        if population.size() == 0 {
            return Err(ConfigError::EmptyPopulation.into());
        }
        let config = EngineConfig::default();
        Ok(Self {
            population,
            selection: Box::new(selection),
            crossover: Box::new(crossover),
            mutation: Box::new(mutation),
            coordinator: Box::new(SingleProcess),
            analysis: Vec::new(),
            fitness: None,
            original_fitness: None,
            context: GenerationContext::default(),
            rng: seeded_rng(&config, 0),
            config,
        })
    }

    /// Sets the configuration and reseeds the RNG.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.rng = seeded_rng(&config, self.coordinator.rank());
        self.config = config;
        self
    }

    /// Joins a worker group and reseeds the RNG for this worker's rank.
    pub fn with_coordinator<D>(mut self, coordinator: D) -> Self
    where
        D: Coordinator<P::Candidate> + 'static,
    {
        self.rng = seeded_rng(&self.config, coordinator.rank());
        self.coordinator = Box::new(coordinator);
        self
    }

    /// Registers a fitness function; see [`register_fitness`](Self::register_fitness).
    pub fn with_fitness<F>(mut self, fitness: F) -> Self
    where
        F: FitnessFn<P::Candidate> + 'static,
    {
        self.register_fitness(fitness);
        self
    }

    /// Instantiates and registers a hook type; see [`register_analysis`](Self::register_analysis).
    pub fn with_analysis<H>(mut self) -> Result<Self>
    where
        H: AnalysisHook<P> + Default + 'static,
    {
        self.register_analysis::<H>()?;
        Ok(self)
    }

    // ---- Registration ----

    /// Registers `fitness` as the active fitness function.
    ///
    /// The original fitness (the basis of population statistics) is set to
    /// the same function only if none was registered before.
    pub fn register_fitness<F>(&mut self, fitness: F)
    where
        F: FitnessFn<P::Candidate> + 'static,
    {
        let function = FitnessFunction::new(fitness);
        if self.original_fitness.is_none() {
            self.original_fitness = Some(function.clone());
        }
        self.fitness = Some(function);
    }

    /// Registers `fitness` with static linear scaling.
    ///
    /// The active fitness becomes the scaled function and `fitness` itself
    /// becomes the original fitness.
    pub fn register_linear_scaling<F>(&mut self, fitness: F, scaling: LinearScaling) -> Result<()>
    where
        F: FitnessFn<P::Candidate> + 'static,
    {
        self.register_scaled(fitness, scaling.into())
    }

    /// Registers `fitness` with dynamic linear scaling.
    ///
    /// Same replacement rules as [`register_linear_scaling`](Self::register_linear_scaling).
    pub fn register_dynamic_linear_scaling<F>(
        &mut self,
        fitness: F,
        scaling: DynamicLinearScaling,
    ) -> Result<()>
    where
        F: FitnessFn<P::Candidate> + 'static,
    {
        self.register_scaled(fitness, scaling.into())
    }

    fn register_scaled<F>(&mut self, fitness: F, scaling: Scaling) -> Result<()>
    where
        F: FitnessFn<P::Candidate> + 'static,
    {
        scaling.validate()?;
        let original = FitnessFunction::new(fitness);
        self.fitness = Some(original.with_scaling(scaling));
        self.original_fitness = Some(original);
        Ok(())
    }

    /// Instantiates a hook type and appends it to the registry.
    ///
    /// Registering the same type twice yields two independent instances.
    pub fn register_analysis<H>(&mut self) -> Result<()>
    where
        H: AnalysisHook<P> + Default + 'static,
    {
        self.register_hook(H::default())
    }

    /// Appends an already constructed hook to the registry.
    pub fn register_hook<H>(&mut self, hook: H) -> Result<()>
    where
        H: AnalysisHook<P> + 'static,
    {
        if hook.interval() == 0 {
            return Err(ConfigError::InvalidInterval.into());
        }
        self.analysis.push(Box::new(hook));
        Ok(())
    }

    // ---- Accessors ----

    /// The current population.
    pub fn population(&self) -> &P {
        &self.population
    }

    /// Consumes the engine, returning its population.
    pub fn into_population(self) -> P {
        self.population
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current generation, or `None` when no run is in progress.
    pub fn current_generation(&self) -> Option<usize> {
        self.context.generation
    }

    /// Latest population statistics (`fmax`, `fmin`, `fmean`).
    pub fn statistics(&self) -> Option<PopulationStats> {
        self.context.stats
    }

    /// Generation counter and statistics as seen by scaling and mutation.
    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// The active (possibly scaled) fitness function.
    pub fn fitness(&self) -> Option<&FitnessFunction<P::Candidate>> {
        self.fitness.as_ref()
    }

    /// The unscaled fitness function used for population statistics.
    pub fn original_fitness(&self) -> Option<&FitnessFunction<P::Candidate>> {
        self.original_fitness.as_ref()
    }

    /// Number of registered analysis hooks.
    pub fn analysis_count(&self) -> usize {
        self.analysis.len()
    }

    // ---- Execution ----

    /// Runs for the configured number of generations.
    pub fn run_default(&mut self) -> Result<EvolutionResult<P::Candidate>> {
        self.run(self.config.generations)
    }

    /// Runs exactly `generations` generations.
    ///
    /// Fails before touching any state if no fitness is registered or the
    /// population size is not a positive even number. Once generation 0 has
    /// started, every hook is finalized exactly once and the generation
    /// counter is reset on every exit path. A failure leaves the population
    /// as the last completed generation produced it.
    pub fn run(&mut self, generations: usize) -> Result<EvolutionResult<P::Candidate>> {
        let fitness = self.fitness.clone().ok_or(ConfigError::MissingFitness)?;
        let original = self
            .original_fitness
            .clone()
            .unwrap_or_else(|| fitness.unscaled());

        let size = self.population.size();
        if size == 0 {
            return Err(ConfigError::EmptyPopulation.into());
        }
        if size % 2 != 0 {
            return Err(ConfigError::OddPopulationSize { size }.into());
        }

        let master = self.coordinator.is_master();
        if master {
            info!(
                "Starting evolution: {} generations, population {}, {} worker(s)",
                generations,
                size,
                self.coordinator.size()
            );
        }

        self.context.stats = Some(self.compute_stats(&original)?);

        let view = EngineView {
            population: &self.population,
            context: &self.context,
            fitness: &fitness,
            original_fitness: &original,
        };
        for hook in self.analysis.iter_mut() {
            hook.setup(generations, &view)?;
        }

        let outcome = self.evolve(generations, &fitness, &original);
        if let Err(err) = &outcome {
            if master {
                error!(
                    "Evolution failed at generation {:?}: {}",
                    self.context.generation, err
                );
            }
        }

        self.context.generation = None;
        let finalized = self.finalize_hooks(&fitness, &original);
        outcome?;
        finalized?;

        let best = {
            let context = &self.context;
            self.population
                .best(&|c| fitness.evaluate(c, context))?
                .clone()
        };
        let best_fitness = original.evaluate(&best, &self.context)?;
        let stats = self.context.stats.ok_or(EvolveError::StatisticsUnavailable)?;
        if master {
            info!(
                "Evolution finished: best fitness {:.6}, mean {:.6}",
                best_fitness, stats.mean
            );
        }

        Ok(EvolutionResult {
            best,
            best_fitness,
            generations,
            stats,
        })
    }

    fn evolve(
        &mut self,
        generations: usize,
        fitness: &FitnessFunction<P::Candidate>,
        original: &FitnessFunction<P::Candidate>,
    ) -> Result<()> {
        let size = self.population.size();

        for g in 0..generations {
            self.context.generation = Some(g);

            let best = {
                let context = &self.context;
                self.population
                    .best(&|c| fitness.evaluate(c, context))?
                    .clone()
            };

            // One reproduction unit yields two offspring.
            let local_units = self.coordinator.split(size / 2);
            let mut local = Vec::with_capacity(local_units * 2);
            let bound = fitness.bind(&self.context);
            for _ in 0..local_units {
                let (father, mother) =
                    self.selection
                        .select(self.population.individuals(), &bound, &mut self.rng)?;
                let (child1, child2) = self.crossover.cross(&father, &mother, &mut self.rng)?;
                local.push(self.mutation.mutate(child1, &self.context, &mut self.rng)?);
                local.push(self.mutation.mutate(child2, &self.context, &mut self.rng)?);
            }

            let mut next = self.coordinator.merge(local)?;
            if next.len() != size {
                return Err(EvolveError::MergeSizeMismatch {
                    expected: size,
                    actual: next.len(),
                });
            }
            next[0] = best;
            self.population.set_individuals(next);

            let stats = self.compute_stats(original)?;
            self.context.stats = Some(stats);
            if self.coordinator.is_master() {
                debug!(
                    "Generation {}: fmax {:.6}, fmin {:.6}, fmean {:.6}",
                    g, stats.max, stats.min, stats.mean
                );
            }

            let view = EngineView {
                population: &self.population,
                context: &self.context,
                fitness,
                original_fitness: original,
            };
            for hook in self.analysis.iter_mut() {
                if g % hook.interval() == 0 {
                    hook.register_step(g, &view)?;
                }
            }
        }

        Ok(())
    }

    fn compute_stats(&self, original: &FitnessFunction<P::Candidate>) -> Result<PopulationStats> {
        let context = &self.context;
        self.population.stats(&|c| original.evaluate(c, context))
    }

    /// Finalizes every hook, in registration order, even if one fails.
    fn finalize_hooks(
        &mut self,
        fitness: &FitnessFunction<P::Candidate>,
        original: &FitnessFunction<P::Candidate>,
    ) -> Result<()> {
        let view = EngineView {
            population: &self.population,
            context: &self.context,
            fitness,
            original_fitness: original,
        };
        let mut first_error = None;
        for hook in self.analysis.iter_mut() {
            if let Err(err) = hook.finalize(&view) {
                if self.coordinator.is_master() {
                    warn!("Analysis finalization failed: {}", err);
                }
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

fn seeded_rng(config: &EngineConfig, rank: usize) -> StdRng {
    match config.worker_seed(rank) {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

// ============================================================================
// Tests
// ============================================================================
