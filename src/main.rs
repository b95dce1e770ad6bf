use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use u_cloudsched::kpi::AssignmentKpi;
use u_cloudsched::models::JobSet;
use u_cloudsched::optimizer::{Optimizer, OptimizerConfig, OptimizerResult, Strategy};
use u_cloudsched::trace::{JobSource, JsonTraceSource};

#[derive(Parser, Debug)]
#[command(name = "u-cloudsched")]
#[command(version)]
#[command(about = "Assign a job trace to machines with hybrid Grey-Wolf/GA search")]
struct Args {
    /// JSON job trace (array of records with a "Run Time" column)
    #[arg(long)]
    trace: PathBuf,

    /// JSON optimizer config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of machines (M)
    #[arg(long)]
    machines: Option<usize>,

    /// Population size (P)
    #[arg(long)]
    population: Option<usize>,

    /// Generation budget
    #[arg(long)]
    iterations: Option<usize>,

    /// Optimize only the first N jobs of the trace
    #[arg(long, default_value = "30")]
    tasks: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Search strategy: hybrid or random-search
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Run both strategies on the same seed and report each
    #[arg(long)]
    compare: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    strategy: Strategy,
    generations: usize,
    evaluations: usize,
    assignment: &'a [usize],
    #[serde(flatten)]
    kpi: AssignmentKpi,
}

impl<'a> RunReport<'a> {
    fn new(result: &'a OptimizerResult, jobs: &JobSet) -> Self {
        Self {
            strategy: result.strategy,
            generations: result.generations,
            evaluations: result.evaluations,
            assignment: result.best_assignment(),
            kpi: result.kpi(jobs),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str::<OptimizerConfig>(&fs::read_to_string(path)?)?,
        None => OptimizerConfig::default(),
    };
    if let Some(machines) = args.machines {
        config.machines = machines;
    }
    if let Some(population) = args.population {
        config.population_size = population;
    }
    if let Some(iterations) = args.iterations {
        config.max_iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }

    let jobs = JsonTraceSource::new(&args.trace)
        .with_limit(args.tasks)
        .load()?;

    let strategies = if args.compare {
        // Both strategies must start from the same initial population.
        if config.seed.is_none() {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "Generated seed for comparison");
            config.seed = Some(seed);
        }
        vec![Strategy::Hybrid, Strategy::RandomSearch]
    } else {
        vec![config.strategy]
    };

    let mut results = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let optimizer = Optimizer::new(config.clone().with_strategy(strategy));
        results.push(optimizer.run(&jobs)?);
    }

    let reports: Vec<RunReport<'_>> = results.iter().map(|r| RunReport::new(r, &jobs)).collect();
    if reports.iter().any(|r| r.kpi.is_degenerate()) {
        tracing::warn!("Every machine load is zero; utilization and load balancing are undefined");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            if reports.len() > 1 {
                if i > 0 {
                    println!();
                }
                println!("[{}]", report.strategy);
            }
            println!("{}", report.kpi);
        }
    }

    Ok(())
}
