//! Evolutionary solver for the dynamic Traveling Salesman Problem.
//!
//! A fixed-size population of candidate tours evolves under windowed
//! tournament selection with elitist per-slot replacement, while the
//! underlying city positions drift every few generations — so the search
//! has to keep re-adapting instead of converging once.
//!
//! # Key Types
//!
//! - [`City`]: an immutable 2D location with an integer distance metric
//! - [`Tour`]: an ordering of city indices with a cached closed-loop cost
//! - [`Environment`]: baseline and drifted city positions
//! - [`EngineConfig`]: all run parameters — population size, tournament
//!   shape, operator rates, perturbation schedule
//! - [`Engine`]: executes the generational loop and reports progress
//!
//! # Submodules
//!
//! - [`ops`]: mutation and crossover operators over index permutations
//! - [`io`]: city-list ingestion (`"<x>, <y>"` per line)
//!
//! # Example
//!
//! ```
//! use dyntsp::{Engine, EngineConfig};
//!
//! let cities = dyntsp::io::parse_cities("0, 0\n0, 10\n10, 10\n10, 0\n".as_bytes())?;
//! let config = EngineConfig::default()
//!     .with_population_size(20)
//!     .with_generations(10)
//!     .with_seed(42);
//! let mut engine = Engine::new(cities, config)?;
//! let result = engine.run();
//! assert!(result.best_cost > 0.0);
//! # Ok::<(), dyntsp::Error>(())
//! ```

pub mod city;
pub mod engine;
pub mod environment;
pub mod error;
pub mod io;
pub mod ops;
pub mod random;
pub mod tour;

pub use city::City;
pub use engine::{Engine, EngineConfig, GenerationSnapshot, MutationGate, RunResult};
pub use environment::Environment;
pub use error::{Error, Result};
pub use ops::{CrossoverOp, MutationOp};
pub use tour::Tour;
