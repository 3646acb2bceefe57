//! The generational evolution loop.
//!
//! [`Engine`] owns the population, the drifting environment, and the
//! master RNG. One [`Engine::step`] is a full generational turnover:
//! sort, per-slot tournament selection, crossover/mutation, elitist
//! acceptance, wholesale replacement, sort. [`Engine::run`] drives the
//! configured number of generations and applies the periodic environment
//! perturbation between them.

use std::cmp::Ordering;

use log::warn;
use rand::rngs::StdRng;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::EngineConfig;
use super::tournament;
use crate::city::City;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::random::create_rng;
use crate::tour::Tour;

/// What the engine exposes to an observer after each generation: the
/// current best tour and the live city positions, for rendering or
/// logging. The engine formats nothing itself.
#[derive(Debug)]
pub struct GenerationSnapshot<'a> {
    /// 1-based generation counter.
    pub generation: usize,
    /// Visiting order of the current best tour.
    pub best_order: &'a [usize],
    /// Cost of the current best tour against the live city positions.
    pub best_cost: f64,
    /// The live (possibly drifted) city positions.
    pub cities: &'a [City],
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Visiting order of the cheapest tour observed at any generation.
    pub best_order: Vec<usize>,
    /// Its cost, measured against the city positions of its generation.
    pub best_cost: f64,
    /// Number of generations executed.
    pub generations: usize,
    /// Best cost at the end of each generation.
    pub cost_history: Vec<f64>,
}

/// Executes the evolutionary loop over a drifting city set.
///
/// # Usage
///
/// ```
/// use dyntsp::{City, Engine, EngineConfig};
///
/// let cities = vec![
///     City::new(0, 0),
///     City::new(0, 10),
///     City::new(10, 10),
///     City::new(10, 0),
/// ];
/// let config = EngineConfig::default()
///     .with_population_size(20)
///     .with_generations(10)
///     .with_seed(42);
/// let mut engine = Engine::new(cities, config)?;
/// let result = engine.run();
/// assert_eq!(result.cost_history.len(), 10);
/// # Ok::<(), dyntsp::Error>(())
/// ```
pub struct Engine {
    config: EngineConfig,
    environment: Environment,
    population: Vec<Tour>,
    rng: StdRng,
    generation: usize,
}

impl Engine {
    /// Validates the configuration, seeds the RNG, and builds the initial
    /// population by greedy nearest-neighbor construction.
    pub fn new(cities: Vec<City>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        if cities.is_empty() {
            return Err(Error::invalid_config("city list must not be empty"));
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let environment = Environment::new(cities, config.shift_amount);
        let population: Vec<Tour> = (0..config.population_size)
            .map(|_| Tour::nearest_neighbor(environment.current(), &mut rng))
            .collect();

        let mut engine = Self {
            config,
            environment,
            population,
            rng,
            generation: 0,
        };
        engine.sort_population();
        Ok(engine)
    }

    /// The current population. Sorted ascending by cost right after
    /// construction and after every step.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// The live city positions.
    pub fn cities(&self) -> &[City] {
        self.environment.current()
    }

    /// The cheapest tour in the current population.
    pub fn best(&self) -> &Tour {
        self.population
            .iter()
            .min_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap_or(Ordering::Equal))
            .expect("population must not be empty")
    }

    /// Number of generational steps executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Executes one generational step.
    ///
    /// Every output slot runs its own tournament against the previous
    /// generation (read-only) and writes one tour; replacement is elitist
    /// per slot — a child worse than any of its tournament members is
    /// discarded in favor of the slot's outgoing tour. The population is
    /// replaced wholesale and re-sorted.
    pub fn step(&mut self) {
        self.sort_population();

        // One sub-seed per slot keeps results reproducible whether slots
        // run serially or in parallel.
        let seeds: Vec<u64> = (0..self.config.population_size)
            .map(|_| self.rng.random::<u64>())
            .collect();

        self.population = self.evolve_slots(&seeds);
        self.sort_population();
        self.generation += 1;
    }

    /// Runs the configured number of generations from the current state.
    pub fn run(&mut self) -> RunResult {
        self.run_with_observer(|_| {})
    }

    /// Runs the configured number of generations, invoking `observer`
    /// after each one with the current best tour and city positions.
    ///
    /// Every `perturbation_period` generations the environment rebuilds
    /// the working city set from the baseline; all tour costs are then
    /// recomputed against the new positions.
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> RunResult
    where
        F: FnMut(&GenerationSnapshot),
    {
        let mut cost_history = Vec::with_capacity(self.config.generations);
        let mut best_order = self.population[0].order().to_vec();
        let mut best_cost = f64::INFINITY;

        for gen_index in 0..self.config.generations {
            self.step();

            if gen_index % self.config.perturbation_period == 0 {
                self.environment.perturb(&mut self.rng);
                let cities = self.environment.current();
                for tour in &mut self.population {
                    tour.recompute_cost(cities);
                }
                self.sort_population();
            }

            let best = &self.population[0];
            cost_history.push(best.cost());
            if best.cost() < best_cost {
                best_cost = best.cost();
                best_order = best.order().to_vec();
            }

            observer(&GenerationSnapshot {
                generation: self.generation,
                best_order: best.order(),
                best_cost: best.cost(),
                cities: self.environment.current(),
            });
        }

        RunResult {
            best_order,
            best_cost,
            generations: self.config.generations,
            cost_history,
        }
    }

    fn sort_population(&mut self) {
        self.population
            .sort_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap_or(Ordering::Equal));
    }

    #[cfg(feature = "parallel")]
    fn evolve_slots(&self, seeds: &[u64]) -> Vec<Tour> {
        if self.config.parallel {
            return seeds
                .par_iter()
                .enumerate()
                .map(|(slot, &seed)| self.evolve_slot(slot, seed))
                .collect();
        }
        seeds
            .iter()
            .enumerate()
            .map(|(slot, &seed)| self.evolve_slot(slot, seed))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evolve_slots(&self, seeds: &[u64]) -> Vec<Tour> {
        seeds
            .iter()
            .enumerate()
            .map(|(slot, &seed)| self.evolve_slot(slot, seed))
            .collect()
    }

    /// Produces the tour for one output slot: tournament, crossover or
    /// copy, mutation pipeline, elitist acceptance.
    fn evolve_slot(&self, slot: usize, seed: u64) -> Tour {
        let mut rng = create_rng(seed);
        let cities = self.environment.current();
        let config = &self.config;

        let picks = tournament::draw(config.tournament_window, config.tournament_size, &mut rng);
        let mut members: Vec<&Tour> = picks.iter().map(|&i| &self.population[i]).collect();
        members.sort_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap_or(Ordering::Equal));

        let mut child_order = if rng.random_range(0.0..1.0) < config.crossover_rate {
            config
                .crossover
                .apply(members[0].order(), members[1].order(), cities, &mut rng)
        } else {
            members[0].order().to_vec()
        };

        for gate in &config.mutations {
            if rng.random_range(0.0..1.0) < gate.rate {
                gate.op.apply(&mut child_order, cities, &mut rng);
            }
        }

        let child = Tour::from_order(child_order, cities);
        if !child.is_valid() {
            warn!(
                "generation {}: slot {slot} produced a tour with repeated cities",
                self.generation
            );
        }

        if members.iter().any(|member| child.cost() > member.cost()) {
            self.population[slot].clone()
        } else {
            child
        }
    }
}
