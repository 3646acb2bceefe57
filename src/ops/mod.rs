//! Operator library: mutation and crossover strategies for tours.
//!
//! Operators work on raw `usize` index buffers so they stay independent of
//! [`Tour`](crate::tour::Tour) bookkeeping; callers recompute the cost
//! afterward. [`CrossoverOp`] and [`MutationOp`] are the
//! configuration-facing registry the engine dispatches through.
//!
//! # Crossover Operators
//!
//! - [`crossover::sequential_crossover`]: short-edge-biased constructive merge
//! - [`crossover::clean_crossover`]: single cut + nearest-unused repair
//! - [`crossover::order_crossover`] (OX): two-point order crossover
//!
//! # Mutation Operators
//!
//! - [`mutation::greedy_mutate`]: pull a city's nearest neighbor next to it
//! - [`mutation::shuffle_mutate`]: independent random swaps per position
//! - [`mutation::inversion_mutate`]: reverse a random segment
//! - [`mutation::transposition_mutate`]: swap two random positions
//! - [`mutation::translocation_mutate`]: cut one element, paste elsewhere
//! - [`mutation::three_opt_mutate`]: one of the four pure 3-opt reconnections

pub mod crossover;
pub mod mutation;

use rand::Rng;

use crate::city::City;

/// Crossover strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverOp {
    /// Short-edge-biased constructive merge of both parents.
    Sequential,
    /// Single cut point followed by a nearest-unused repair pass.
    Clean,
    /// Two-point order crossover.
    Order,
}

impl CrossoverOp {
    /// Produces a child buffer from two parent tours.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        cities: &[City],
        rng: &mut R,
    ) -> Vec<usize> {
        match self {
            CrossoverOp::Sequential => crossover::sequential_crossover(parent1, parent2, cities),
            CrossoverOp::Clean => crossover::clean_crossover(parent1, parent2, cities, rng),
            CrossoverOp::Order => crossover::order_crossover(parent1, parent2, rng),
        }
    }
}

/// Mutation strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationOp {
    /// Pull the globally nearest neighbor of a random city next to it.
    Greedy,
    /// Sweep the tour, swapping each position with probability `swap_prob`.
    Shuffle { swap_prob: f64 },
    /// Reverse a random segment.
    Inversion,
    /// Swap two random positions.
    Transposition,
    /// Cut a single element and reinsert it elsewhere.
    Translocation,
    /// Apply one of the four pure 3-opt reconnections.
    ThreeOpt,
}

impl MutationOp {
    /// Mutates the buffer in place; the caller recomputes the cost.
    pub fn apply<R: Rng>(&self, order: &mut Vec<usize>, cities: &[City], rng: &mut R) {
        match *self {
            MutationOp::Greedy => mutation::greedy_mutate(order, cities, rng),
            MutationOp::Shuffle { swap_prob } => mutation::shuffle_mutate(order, swap_prob, rng),
            MutationOp::Inversion => mutation::inversion_mutate(order, rng),
            MutationOp::Transposition => mutation::transposition_mutate(order, rng),
            MutationOp::Translocation => mutation::translocation_mutate(order, rng),
            MutationOp::ThreeOpt => mutation::three_opt_mutate(order, rng),
        }
    }
}
