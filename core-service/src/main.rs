//! N.E.T.R.A. - Command line entry point
//!
//! ## Commands
//! - `analyze` - Evaluate one reading at a location
//! - `batch` - Evaluate every (or selected) location with synthetic readings
//! - `locations` - List monitored sites

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use netra_core::constants::{APP_NAME, APP_VERSION};
use netra_core::{EngineConfig, EngineResult, ExportFormat, HeuristicModel, ThreatEngine};

#[derive(Parser, Debug)]
#[command(name = "netra")]
#[command(about = "Multi-sensor threat fusion for IED detection")]
#[command(version)]
struct Args {
    /// Prefix of generated scan ids
    #[arg(long, global = true, env = "NETRA_SCAN_PREFIX")]
    prefix: Option<String>,

    /// Attach the heuristic model prediction to each result
    #[arg(long, global = true)]
    model: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one sensor reading
    Analyze {
        /// Location key (see `locations`)
        #[arg(short, long)]
        location: String,

        /// JSON object with all seven channels
        #[arg(short, long)]
        sensors: String,
    },
    /// Evaluate locations with synthetic readings
    Batch {
        /// Comma separated location keys (default: all)
        #[arg(short, long, value_delimiter = ',')]
        locations: Vec<String>,

        /// Seed for reproducible readings
        #[arg(long, env = "NETRA_RANDOM_SEED")]
        seed: Option<u64>,

        /// Write the flat artifact to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// csv, json or jsonl
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },
    /// List monitored sites
    Locations {
        /// Only sites in this state
        #[arg(long)]
        state: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{} v{}", APP_NAME, APP_VERSION);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[{}] {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> EngineResult<()> {
    let mut config = EngineConfig::from_env();
    if let Some(prefix) = args.prefix {
        config.scan_prefix = prefix;
    }
    if let Command::Batch { seed: Some(seed), .. } = &args.command {
        config.random_seed = Some(*seed);
    }

    let mut engine = ThreatEngine::new(config);
    if args.model {
        engine = engine.with_model(Box::new(HeuristicModel::default()));
    }

    match args.command {
        Command::Analyze { location, sensors } => {
            let sensors: serde_json::Value = serde_json::from_str(&sensors)?;
            let result = engine.evaluate_json(&location, &sensors)?;
            print_json(&result)
        }
        Command::Batch {
            locations,
            export,
            format,
            ..
        } => {
            let keys = (!locations.is_empty()).then_some(locations);
            let results = engine.batch_evaluate(keys.as_deref())?;
            print_json(&results)?;
            print_json(&engine.statistics())?;

            if let Some(path) = export {
                let rows = engine.export_to_file(&path, format)?;
                log::info!("Exported {} rows to {}", rows, path.display());
            }
            Ok(())
        }
        Command::Locations { state } => {
            let registry = engine.registry();
            match state {
                Some(state) => print_json(&registry.by_state(&state)),
                None => print_json(&registry.entries()),
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> EngineResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
