use catalog_score::catalog::{load_catalog, CatalogGenerator};
use catalog_score::config::{self, Config};
use catalog_score::output;
use catalog_score::scoring::{validate_scoring, Scorer};
use catalog_score::throughput::{self, ThroughputOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a sample catalog, then measure throughput (default if no subcommand)
    Run,
    /// Score a single catalog
    Score {
        /// YAML or JSON file with attribute values (defaults to a generated catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Seed for the generated catalog
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Measure scoring throughput on a worker pool
    Bench {
        /// Number of catalogs to score
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Seed for the synthetic workload
        #[arg(long)]
        seed: Option<u64>,

        /// Start timing without warming the worker pool first
        #[arg(long)]
        no_warmup: bool,

        /// Print the measurement as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "catalog-score")]
#[command(about = "Weighted catalog quality scoring and throughput measurement", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/catalog-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Run);

    if let Commands::Init { force } = command {
        let path = match cli.config.map_or_else(config::get_config_path, Ok) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let scorer = Scorer::from_config(&effective_scoring);
    tracing::debug!("Scoring with {} parameters", scorer.parameters().len());

    let result = match command {
        Commands::Run => run_reference(&scorer, &config, cli.verbose),
        Commands::Score {
            catalog,
            seed,
            json,
        } => score_catalog(&scorer, catalog, seed, json, cli.verbose),
        Commands::Bench {
            iterations,
            workers,
            seed,
            no_warmup,
            json,
        } => {
            let mut options = bench_options(&config);
            if let Some(n) = iterations {
                options.iterations = n;
            }
            if let Some(w) = workers {
                options.workers = w;
            }
            if seed.is_some() {
                options.seed = seed;
            }
            if no_warmup {
                options.warmup = false;
            }
            bench(&scorer, &options, json, cli.verbose)
        }
        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn bench_options(config: &Config) -> ThroughputOptions {
    config.bench.clone().unwrap_or_default().to_options()
}

/// Score one generated catalog, then benchmark the scorer.
fn run_reference(scorer: &Scorer, config: &Config, verbose: bool) -> anyhow::Result<()> {
    let options = bench_options(config);
    let sample = CatalogGenerator::from_entropy().generate();
    let use_colors = output::should_use_colors();

    let result = scorer.score_with_breakdown(&sample);
    println!("{}", output::format_score(result.score));
    if verbose {
        println!("{}", output::format_breakdown(&result, use_colors));
    }

    let measurement = throughput::benchmark_scorer(scorer, &options)?;
    println!("{}", output::format_throughput(&measurement));
    if verbose {
        println!("{}", output::format_measurement_detail(&measurement, use_colors));
    }

    Ok(())
}

fn score_catalog(
    scorer: &Scorer,
    catalog: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    let record = match (catalog, seed) {
        (Some(path), _) => load_catalog(&path)?,
        (None, Some(seed)) => CatalogGenerator::seeded(seed).generate(),
        (None, None) => CatalogGenerator::from_entropy().generate(),
    };

    let result = scorer.score_with_breakdown(&record);
    if json {
        let value = serde_json::json!({
            "catalog": record,
            "score": result.score,
            "breakdown": result.breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", output::format_score(result.score));
        if verbose {
            println!(
                "{}",
                output::format_breakdown(&result, output::should_use_colors())
            );
        }
    }

    Ok(())
}

fn bench(
    scorer: &Scorer,
    options: &ThroughputOptions,
    json: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    let measurement = throughput::benchmark_scorer(scorer, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&measurement)?);
    } else {
        println!("{}", output::format_throughput(&measurement));
        if verbose {
            println!(
                "{}",
                output::format_measurement_detail(&measurement, output::should_use_colors())
            );
        }
    }

    Ok(())
}
