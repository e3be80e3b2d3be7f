//! Built-in mutation strategies.

use rand::{Rng, RngCore};

use super::selection::check_probability;
use super::types::Mutation;
use crate::engine::GenerationContext;
use crate::error::{ConfigError, Result};

/// Flips each bit independently with probability `pm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipBitMutation {
    pm: f64,
}

impl FlipBitMutation {
    pub fn new(pm: f64) -> std::result::Result<Self, ConfigError> {
        check_probability("pm", pm)?;
        Ok(Self { pm })
    }
}

impl Mutation<Vec<bool>> for FlipBitMutation {
    fn mutate(
        &self,
        candidate: Vec<bool>,
        _context: &GenerationContext,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<bool>> {
        Ok(flip_bits(candidate, self.pm, rng))
    }
}

/// Flip-bit mutation that escalates to a "big" rate when the population
/// has converged.
///
/// When `fmax * alpha < fmean` the population mean sits close to its best
/// and the rate `pbm` is used instead of `pm`, re-injecting diversity.
/// Outside a run (no statistics yet) `pm` is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipBitBigMutation {
    pm: f64,
    pbm: f64,
    alpha: f64,
}

impl FlipBitBigMutation {
    pub fn new(pm: f64, pbm: f64, alpha: f64) -> std::result::Result<Self, ConfigError> {
        check_probability("pm", pm)?;
        check_probability("pbm", pbm)?;
        check_probability("alpha", alpha)?;
        Ok(Self { pm, pbm, alpha })
    }

    /// The flip probability used under `context`.
    pub fn rate(&self, context: &GenerationContext) -> f64 {
        match context.stats {
            Some(stats) if stats.max * self.alpha < stats.mean => self.pbm,
            _ => self.pm,
        }
    }
}

impl Mutation<Vec<bool>> for FlipBitBigMutation {
    fn mutate(
        &self,
        candidate: Vec<bool>,
        context: &GenerationContext,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<bool>> {
        Ok(flip_bits(candidate, self.rate(context), rng))
    }
}

fn flip_bits(mut bits: Vec<bool>, p: f64, rng: &mut dyn RngCore) -> Vec<bool> {
    for bit in bits.iter_mut() {
        if rng.random_bool(p) {
            *bit = !*bit;
        }
    }
    bits
}

/// Swap mutation for permutations: with probability `pm`, exchange two
/// random positions.
///
/// # Complexity
/// O(1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutation {
    pm: f64,
}

impl SwapMutation {
    pub fn new(pm: f64) -> std::result::Result<Self, ConfigError> {
        check_probability("pm", pm)?;
        Ok(Self { pm })
    }
}

impl Mutation<Vec<usize>> for SwapMutation {
    fn mutate(
        &self,
        mut candidate: Vec<usize>,
        _context: &GenerationContext,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        let n = candidate.len();
        if n >= 2 && rng.random_bool(self.pm) {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            candidate.swap(i, j);
        }
        Ok(candidate)
    }
}
