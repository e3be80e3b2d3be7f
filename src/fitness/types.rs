//! Fitness function contract and the registered (checked, scaled) wrapper.

use std::fmt;
use std::sync::Arc;

use super::scaling::Scaling;
use crate::engine::GenerationContext;
use crate::error::{EvolveError, Result};

/// A raw fitness function: maps one candidate to a real number.
///
/// Implemented for every `Fn(&C) -> f64 + Send + Sync`, so closures and
/// plain functions can be registered directly.
pub trait FitnessFn<C>: Send + Sync {
    fn fitness(&self, candidate: &C) -> f64;
}

impl<C, F> FitnessFn<C> for F
where
    F: Fn(&C) -> f64 + Send + Sync,
{
    fn fitness(&self, candidate: &C) -> f64 {
        self(candidate)
    }
}

/// Rejects values that are not finite real numbers.
pub(crate) fn check_fitness(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvolveError::InvalidFitness { value })
    }
}

/// A registered fitness function: a raw function plus optional scaling.
///
/// Every evaluation checks the raw value and the scaled value; NaN or
/// infinite results fail with [`EvolveError::InvalidFitness`].
///
/// Cloning is cheap: the raw function is shared.
///
/// ```
/// use u_evolve::{FitnessFunction, GenerationContext};
///
/// let f = FitnessFunction::new(|x: &f64| x * 2.0);
/// let ctx = GenerationContext::default();
/// assert_eq!(f.evaluate(&1.5, &ctx).unwrap(), 3.0);
/// assert!(FitnessFunction::new(|_: &f64| f64::NAN).evaluate(&0.0, &ctx).is_err());
/// ```
pub struct FitnessFunction<C> {
    raw: Arc<dyn FitnessFn<C>>,
    scaling: Scaling,
}

impl<C> Clone for FitnessFunction<C> {
    fn clone(&self) -> Self {
        Self {
            raw: Arc::clone(&self.raw),
            scaling: self.scaling,
        }
    }
}

impl<C> fmt::Debug for FitnessFunction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessFunction")
            .field("scaling", &self.scaling)
            .finish_non_exhaustive()
    }
}

impl<C> FitnessFunction<C> {
    /// Wraps a raw function without scaling.
    pub fn new<F>(raw: F) -> Self
    where
        F: FitnessFn<C> + 'static,
    {
        Self::from_shared(Arc::new(raw), Scaling::None)
    }

    /// Wraps an already shared raw function.
    pub fn from_shared(raw: Arc<dyn FitnessFn<C>>, scaling: Scaling) -> Self {
        Self { raw, scaling }
    }

    /// Same raw function, different scaling.
    pub fn with_scaling(&self, scaling: Scaling) -> Self {
        Self::from_shared(Arc::clone(&self.raw), scaling)
    }

    /// The same raw function with scaling removed.
    pub fn unscaled(&self) -> Self {
        self.with_scaling(Scaling::None)
    }

    pub fn scaling(&self) -> &Scaling {
        &self.scaling
    }

    pub fn is_scaled(&self) -> bool {
        self.scaling != Scaling::None
    }

    /// Checked raw value, ignoring scaling.
    pub fn raw_value(&self, candidate: &C) -> Result<f64> {
        check_fitness(self.raw.fitness(candidate))
    }

    /// Checked, scaled value under `context`.
    pub fn evaluate(&self, candidate: &C, context: &GenerationContext) -> Result<f64> {
        let raw = self.raw_value(candidate)?;
        check_fitness(self.scaling.apply(raw, context)?)
    }

    /// Binds this function to a context for handing to operators.
    pub fn bind<'a>(&'a self, context: &'a GenerationContext) -> BoundFitness<'a, C> {
        BoundFitness {
            function: self,
            context,
        }
    }
}

/// A fitness function bound to one generation's context.
///
/// This is what selection strategies see: a plain `candidate -> score`
/// mapping where higher scores are better.
pub struct BoundFitness<'a, C> {
    function: &'a FitnessFunction<C>,
    context: &'a GenerationContext,
}

impl<C> Clone for BoundFitness<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for BoundFitness<'_, C> {}

impl<'a, C> BoundFitness<'a, C> {
    pub fn evaluate(&self, candidate: &C) -> Result<f64> {
        self.function.evaluate(candidate, self.context)
    }

    pub fn context(&self) -> &'a GenerationContext {
        self.context
    }
}
