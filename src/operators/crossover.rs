//! Built-in crossover strategies.
//!
//! - [`UniformCrossover`]: gene-wise exchange for any `Vec<T>` genome
//! - [`OrderCrossover`] (OX): Davis (1985), preserves relative order of
//!   permutation genomes
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::{Rng, RngCore};

use super::selection::check_probability;
use super::types::Crossover;
use crate::error::{ConfigError, EvolveError, Result};

/// Uniform crossover.
///
/// With probability `pc` the parents are recombined; each gene position is
/// then exchanged between the two children with probability `pe`.
/// Otherwise the children are copies of the parents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCrossover {
    pc: f64,
    pe: f64,
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self { pc: 0.8, pe: 0.5 }
    }
}

impl UniformCrossover {
    pub fn new(pc: f64, pe: f64) -> std::result::Result<Self, ConfigError> {
        check_probability("pc", pc)?;
        check_probability("pe", pe)?;
        Ok(Self { pc, pe })
    }
}

impl<T: Clone + Send + Sync> Crossover<Vec<T>> for UniformCrossover {
    fn cross(
        &self,
        father: &Vec<T>,
        mother: &Vec<T>,
        rng: &mut dyn RngCore,
    ) -> Result<(Vec<T>, Vec<T>)> {
        ensure_same_length(father, mother)?;

        let mut child1 = father.clone();
        let mut child2 = mother.clone();
        if rng.random_bool(self.pc) {
            for i in 0..child1.len() {
                if rng.random_bool(self.pe) {
                    std::mem::swap(&mut child1[i], &mut child2[i]);
                }
            }
        }
        Ok((child1, child2))
    }
}

/// Order Crossover (OX) for permutations.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. Fill remaining positions with elements from parent2, in their original
///    order, skipping elements already present in the child
///
/// # Complexity
/// O(n) time, O(n) space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCrossover;

impl Crossover<Vec<usize>> for OrderCrossover {
    fn cross(
        &self,
        father: &Vec<usize>,
        mother: &Vec<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        ensure_same_length(father, mother)?;
        let n = father.len();
        if n == 0 {
            return Err(EvolveError::operator("parents must not be empty"));
        }
        if !is_permutation(father) || !is_permutation(mother) {
            return Err(EvolveError::operator("parents must be permutations of 0..n"));
        }
        if n == 1 {
            return Ok((father.clone(), mother.clone()));
        }

        let (start, end) = random_segment(n, rng);
        let child1 = ox_build_child(father, mother, start, end);
        let child2 = ox_build_child(mother, father, start, end);
        Ok((child1, child2))
    }
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    // Fill from donor, starting after segment end, wrapping around
    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Whether `perm` holds every value of `0..perm.len()` exactly once.
fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &v in perm {
        match seen.get_mut(v) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

fn ensure_same_length<T>(father: &[T], mother: &[T]) -> Result<()> {
    if father.len() != mother.len() {
        return Err(EvolveError::operator(format!(
            "parents must have equal length, got {} and {}",
            father.len(),
            mother.len()
        )));
    }
    Ok(())
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
pub(crate) fn random_segment(n: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
