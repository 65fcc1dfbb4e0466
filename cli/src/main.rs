//! Cell Lineage Simulator - CLI Entry Point
//!
//! Runs a population from a JSON config and writes the per-cell trace.

use cell_lineage_sim_core::{
    read_trace, Population, SimulationConfig, TraceRecord, TraceSink, TraceWriter, ROOT_PARENT_ID,
};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cell-sim")]
#[command(version)]
#[command(about = "Agent-based cell population simulator with lineage tracing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (JSON); defaults are used when absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of lineage roots to seed
        #[arg(short = 'n', long, default_value = "1")]
        cells: usize,

        /// Number of steps to simulate
        #[arg(short, long, default_value = "100")]
        steps: usize,

        /// Trace output file
        #[arg(short, long, default_value = "trace.txt")]
        output: PathBuf,

        /// Random seed, overrides the config
        #[arg(long)]
        seed: Option<u64>,

        /// Save a checkpoint instead of flushing live cells at the end
        #[arg(long)]
        checkpoint_out: Option<PathBuf>,

        /// Quiet mode (warnings only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Resume a simulation from a checkpoint, appending to the trace
    Resume {
        /// Configuration file the checkpoint was taken with
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Checkpoint file to resume from
        #[arg(long)]
        checkpoint: PathBuf,

        /// Number of additional steps
        #[arg(short, long, default_value = "100")]
        steps: usize,

        /// Trace file to append to
        #[arg(short, long, default_value = "trace.txt")]
        output: PathBuf,

        /// Save a new checkpoint instead of flushing live cells at the end
        #[arg(long)]
        checkpoint_out: Option<PathBuf>,

        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the default configuration file
    Init {
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },

    /// Summarize a trace file
    Summarize {
        /// Trace file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let quiet = matches!(
        cli.command,
        Commands::Run { quiet: true, .. } | Commands::Resume { quiet: true, .. }
    );
    let filter = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Run {
            config,
            cells,
            steps,
            output,
            seed,
            checkpoint_out,
            ..
        } => run_simulation(config, cells, steps, output, seed, checkpoint_out),

        Commands::Resume {
            config,
            checkpoint,
            steps,
            output,
            checkpoint_out,
            ..
        } => resume_simulation(config, checkpoint, steps, output, checkpoint_out),

        Commands::Init { output } => generate_config(output),

        Commands::Summarize { input } => summarize_trace(input),
    }
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Ok(SimulationConfig::from_json_file(path)?)
        }
        None => {
            info!("Using default configuration");
            Ok(SimulationConfig::default())
        }
    }
}

fn run_simulation(
    config_path: Option<PathBuf>,
    cells: usize,
    steps: usize,
    output: PathBuf,
    seed: Option<u64>,
    checkpoint_out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(seed) = seed {
        config.rng_seed = seed;
    }

    let sink = TraceWriter::create(&output)?;
    let mut population = Population::new(config, sink)?;
    population.seed(cells)?;

    info!("Starting simulation: {} cells, {} steps", cells, steps);
    drive(population, steps, checkpoint_out)?;
    info!("Trace written to {:?}", output);
    Ok(())
}

fn resume_simulation(
    config_path: Option<PathBuf>,
    checkpoint_path: PathBuf,
    steps: usize,
    output: PathBuf,
    checkpoint_out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path.as_deref())?;

    info!("Loading checkpoint {:?}", checkpoint_path);
    let json = std::fs::read_to_string(&checkpoint_path)?;

    let file = OpenOptions::new().create(true).append(true).open(&output)?;
    let sink = TraceWriter::new(BufWriter::new(file));
    let population = Population::restore(config, &json, sink)?;

    info!(
        "Resumed at t={} with {} live cells",
        population.now(),
        population.live_count()
    );
    drive(population, steps, checkpoint_out)?;
    info!("Trace appended to {:?}", output);
    Ok(())
}

/// Run `steps` steps, then either flush everything or save a checkpoint
fn drive<S: TraceSink>(
    mut population: Population<S>,
    steps: usize,
    checkpoint_out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut divisions = 0;
    let mut deaths = 0;

    for _ in 0..steps {
        let result = population.step()?;
        divisions += result.divisions;
        deaths += result.deaths;

        // keep the event log bounded over long runs
        let events = population.drain_events();
        debug!("t={}: {} events", population.now(), events.len());

        if population.live_count() == 0 {
            warn!("Population extinct at t={}", population.now());
            break;
        }
    }

    let elapsed = start.elapsed();
    info!(
        "=== Simulation Complete === t={} live={} divisions={} deaths={} ({:.2}s)",
        population.now(),
        population.live_count(),
        divisions,
        deaths,
        elapsed.as_secs_f64()
    );

    match checkpoint_out {
        Some(path) => {
            std::fs::write(&path, population.checkpoint()?)?;
            population.suspend()?;
            info!("Checkpoint saved to {:?}", path);
        }
        None => {
            population.shutdown()?;
        }
    }
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    SimulationConfig::default().to_json_file(&output)?;
    println!("Default configuration written to {:?}", output);
    Ok(())
}

fn summarize_trace(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = read_trace(BufReader::new(File::open(&input)?))?;
    let records: Vec<&TraceRecord> = blocks.iter().flatten().collect();

    let roots = blocks
        .iter()
        .filter(|b| b[0].parent_id == ROOT_PARENT_ID)
        .count();
    let mothers: HashSet<u64> = blocks
        .iter()
        .map(|b| b[0].parent_id)
        .filter(|&p| p != ROOT_PARENT_ID)
        .collect();
    let first = records.iter().map(|r| r.time).min().unwrap_or(0);
    let last = records.iter().map(|r| r.time).max().unwrap_or(0);

    println!("=== Trace Summary: {:?} ===", input);
    println!("Cells:      {}", blocks.len());
    println!("Records:    {}", records.len());
    println!("Roots:      {}", roots);
    println!("Divisions:  {}", mothers.len());
    println!("Time span:  {}..={}", first, last);
    Ok(())
}
