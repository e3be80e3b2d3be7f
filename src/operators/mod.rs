//! Genetic operator strategies.
//!
//! The engine depends only on the [`Selection`], [`Crossover`] and
//! [`Mutation`] traits. The concrete strategies in this module are
//! ready-made implementations for common genome shapes:
//!
//! | Strategy | Genome |
//! |---|---|
//! | [`TournamentSelection`], [`RouletteWheelSelection`], [`LinearRankingSelection`] | any |
//! | [`UniformCrossover`] | `Vec<T>` |
//! | [`OrderCrossover`], [`SwapMutation`] | permutation `Vec<usize>` |
//! | [`FlipBitMutation`], [`FlipBitBigMutation`] | `Vec<bool>` |

mod crossover;
mod mutation;
mod selection;
mod types;

pub use crossover::{OrderCrossover, UniformCrossover};
pub use mutation::{FlipBitBigMutation, FlipBitMutation, SwapMutation};
pub use selection::{LinearRankingSelection, RouletteWheelSelection, TournamentSelection};
pub use types::{Crossover, Mutation, Selection};
