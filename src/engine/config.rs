//! Engine configuration.
//!
//! [`EngineConfig`] holds every parameter that controls a run. Nothing is
//! an embedded constant: population size, tournament shape, operator rates,
//! and the perturbation schedule are all explicit so the engine stays
//! testable.

use crate::error::{Error, Result};
use crate::ops::{CrossoverOp, MutationOp};

/// One gate of the mutation pipeline.
///
/// The operator fires when a fresh probability draw lands below `rate`;
/// every gate draws independently.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationGate {
    pub rate: f64,
    pub op: MutationOp,
}

impl MutationGate {
    pub fn new(rate: f64, op: MutationOp) -> Self {
        Self { rate, op }
    }
}

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use dyntsp::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.perturbation_period, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use dyntsp::{CrossoverOp, EngineConfig};
///
/// let config = EngineConfig::default()
///     .with_population_size(200)
///     .with_crossover(CrossoverOp::Order)
///     .with_crossover_rate(0.3)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Number of tours in the population, fixed for the run.
    pub population_size: usize,

    /// Generations executed per run.
    pub generations: usize,

    /// City positions are perturbed every this many generations.
    pub perturbation_period: usize,

    /// Magnitude of a single cardinal shift during perturbation.
    pub shift_amount: i32,

    /// Selection samples member indices from the best `tournament_window`
    /// tours of the sorted population.
    pub tournament_window: usize,

    /// Distinct members drawn per tournament. Crossover uses the two best;
    /// acceptance compares the child against every member.
    pub tournament_size: usize,

    /// Probability of producing a slot's child by crossover rather than
    /// copying the better tournament member.
    pub crossover_rate: f64,

    /// Crossover strategy.
    pub crossover: CrossoverOp,

    /// Mutation pipeline applied to every child, one independent
    /// probability draw per gate.
    pub mutations: Vec<MutationGate>,

    /// Whether to evaluate slots in parallel (requires the `parallel`
    /// feature; ignored otherwise). Results are identical either way
    /// because every slot owns a seeded sub-stream.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            perturbation_period: 5,
            shift_amount: 60,
            tournament_window: 4,
            tournament_size: 2,
            crossover_rate: 0.1,
            crossover: CrossoverOp::Sequential,
            mutations: vec![
                MutationGate::new(0.2, MutationOp::Shuffle { swap_prob: 0.8 }),
                MutationGate::new(0.2, MutationOp::Greedy),
                MutationGate::new(0.99, MutationOp::Inversion),
            ],
            parallel: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations per run.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the perturbation period.
    pub fn with_perturbation_period(mut self, period: usize) -> Self {
        self.perturbation_period = period;
        self
    }

    /// Sets the cardinal shift magnitude.
    pub fn with_shift_amount(mut self, amount: i32) -> Self {
        self.shift_amount = amount;
        self
    }

    /// Sets the tournament window.
    pub fn with_tournament_window(mut self, window: usize) -> Self {
        self.tournament_window = window;
        self
    }

    /// Sets the number of distinct members drawn per tournament.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: CrossoverOp) -> Self {
        self.crossover = crossover;
        self
    }

    /// Replaces the mutation pipeline.
    pub fn with_mutations(mut self, mutations: Vec<MutationGate>) -> Self {
        self.mutations = mutations;
        self
    }

    /// Enables or disables parallel slot evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, failing fast before any generation
    /// runs.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::invalid_config("population_size must be positive"));
        }
        if self.generations == 0 {
            return Err(Error::invalid_config("generations must be positive"));
        }
        if self.perturbation_period == 0 {
            return Err(Error::invalid_config("perturbation_period must be positive"));
        }
        if self.tournament_size < 2 {
            return Err(Error::invalid_config("tournament_size must be at least 2"));
        }
        if self.tournament_size > self.tournament_window {
            return Err(Error::invalid_config(
                "tournament_size must not exceed tournament_window",
            ));
        }
        if self.tournament_window > self.population_size {
            return Err(Error::invalid_config(
                "tournament_window must not exceed population_size",
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::invalid_config("crossover_rate must be within [0, 1]"));
        }
        for gate in &self.mutations {
            if !(0.0..=1.0).contains(&gate.rate) {
                return Err(Error::invalid_config("mutation rate must be within [0, 1]"));
            }
            if let MutationOp::Shuffle { swap_prob } = gate.op {
                if !(0.0..=1.0).contains(&swap_prob) {
                    return Err(Error::invalid_config("swap_prob must be within [0, 1]"));
                }
            }
        }
        Ok(())
    }
}
