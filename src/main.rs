use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};

use dyntsp::{CrossoverOp, Engine, EngineConfig, Error, MutationGate, MutationOp};

/// Evolutionary solver for the dynamic Traveling Salesman Problem.
#[derive(Parser)]
#[command(name = "dyntsp", version, about)]
struct Args {
    /// City list file, one "<x>, <y>" pair per line
    #[arg(long, default_value = "data/cities.txt")]
    cities: PathBuf,

    /// Number of independent runs
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Generations per run
    #[arg(long, default_value_t = 100)]
    generations: usize,

    /// Population size
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Perturb city positions every this many generations
    #[arg(long, default_value_t = 5)]
    perturbation_period: usize,

    /// Magnitude of a single cardinal city shift
    #[arg(long, default_value_t = 60)]
    shift_amount: i32,

    /// Selection samples from the best this-many tours
    #[arg(long, default_value_t = 4)]
    tournament_window: usize,

    /// Distinct members drawn per tournament
    #[arg(long, default_value_t = 2)]
    tournament_size: usize,

    /// Crossover probability per slot
    #[arg(long, default_value_t = 0.1)]
    crossover_rate: f64,

    /// Shuffle-mutation gate probability
    #[arg(long, default_value_t = 0.2)]
    shuffle_rate: f64,

    /// Per-position swap probability inside shuffle mutation
    #[arg(long, default_value_t = 0.8)]
    shuffle_swap_prob: f64,

    /// Greedy-mutation gate probability
    #[arg(long, default_value_t = 0.2)]
    greedy_rate: f64,

    /// Inversion-mutation gate probability
    #[arg(long, default_value_t = 0.99)]
    inversion_rate: f64,

    /// RNG seed; consecutive runs use seed, seed+1, ...
    #[arg(long)]
    seed: Option<u64>,

    /// Append each run's best cost to this file
    #[arg(long)]
    results: Option<PathBuf>,

    /// Log level filter
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> dyntsp::Result<()> {
    if args.runs == 0 {
        return Err(Error::invalid_config("runs must be positive"));
    }

    let cities = dyntsp::io::load_cities(&args.cities)?;
    info!("loaded {} cities from {}", cities.len(), args.cities.display());

    let mut best_costs = Vec::with_capacity(args.runs);
    for run_index in 0..args.runs {
        let run_number = run_index + 1;
        let config = config_for_run(args, run_index);
        let mut engine = Engine::new(cities.clone(), config)?;

        info!("run {run_number}");
        let result = engine.run_with_observer(|snapshot| {
            info!(
                "gen {:>3} best cost {:.0}",
                snapshot.generation, snapshot.best_cost
            );
        });
        info!("run {run_number} minimum cost {:.2}", result.best_cost);
        best_costs.push(result.best_cost);
    }

    if let Some(path) = &args.results {
        append_results(path, &best_costs)?;
    }

    let lowest = best_costs.iter().cloned().fold(f64::INFINITY, f64::min);
    let highest = best_costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let average = best_costs.iter().sum::<f64>() / best_costs.len() as f64;
    info!("statistics after {} runs", args.runs);
    info!("lowest: {lowest:.2} average: {average:.2} highest: {highest:.2}");

    Ok(())
}

fn config_for_run(args: &Args, run_index: usize) -> EngineConfig {
    let mut config = EngineConfig::default()
        .with_population_size(args.population)
        .with_generations(args.generations)
        .with_perturbation_period(args.perturbation_period)
        .with_shift_amount(args.shift_amount)
        .with_tournament_window(args.tournament_window)
        .with_tournament_size(args.tournament_size)
        .with_crossover_rate(args.crossover_rate)
        .with_crossover(CrossoverOp::Sequential)
        .with_mutations(vec![
            MutationGate::new(
                args.shuffle_rate,
                MutationOp::Shuffle {
                    swap_prob: args.shuffle_swap_prob,
                },
            ),
            MutationGate::new(args.greedy_rate, MutationOp::Greedy),
            MutationGate::new(args.inversion_rate, MutationOp::Inversion),
        ]);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed.wrapping_add(run_index as u64));
    }
    config
}

fn append_results(path: &Path, best_costs: &[f64]) -> dyntsp::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for cost in best_costs {
        writeln!(file, "{cost}")?;
    }
    Ok(())
}
