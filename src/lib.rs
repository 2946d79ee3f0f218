//! Cocoprep: prepare COCO detection corpora for training.
//!
//! Cocoprep indexes a COCO annotation store for random-access retrieval of
//! `(image, target)` pairs, and derives class-balanced subsets of a store by
//! capping the number of instances per category.
//!
//! # Modules
//!
//! - [`coco`]: COCO store model and JSON I/O
//! - [`index`]: Positional `(image, target)` retrieval with contiguous labels
//! - [`balance`]: Per-category capped sampling
//! - [`inspect`]: Summaries of an index
//! - [`error`]: Error types for cocoprep operations

pub mod balance;
pub mod coco;
pub mod error;
pub mod index;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::CocoprepError;

/// The cocoprep CLI application.
#[derive(Parser)]
#[command(name = "cocoprep")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write a subset with at most N instances per category.
    Balance(BalanceArgs),
    /// Summarise an annotation file as a training index.
    Inspect(InspectArgs),
}

/// Arguments for the balance subcommand.
#[derive(clap::Args)]
struct BalanceArgs {
    /// Input COCO JSON file.
    input: PathBuf,

    /// Output COCO JSON file.
    #[arg(short, long)]
    output: PathBuf,

    /// Maximum number of instances kept per category.
    #[arg(short = 'n', long, default_value_t = balance::DEFAULT_PER_CATEGORY)]
    per_category: usize,

    /// Seed for reproducible sampling.
    #[arg(long, env = "COCOPREP_SEED")]
    seed: Option<u64>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// COCO JSON annotation file.
    annotations: PathBuf,

    /// Image root that file names are relative to.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Show the target at this position.
    #[arg(long)]
    index: Option<usize>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the cocoprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CocoprepError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Balance(args)) => run_balance(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("cocoprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Index COCO detection annotations and derive class-balanced subsets.");
            println!();
            println!("Run 'cocoprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the balance subcommand.
fn run_balance(args: BalanceArgs) -> Result<(), CocoprepError> {
    let opts = balance::BalanceOptions {
        per_category: args.per_category,
        seed: args.seed,
    };

    let report = balance::balance_file(&args.input, &args.output, &opts)?;

    match args.report.as_str() {
        "json" => println!("{}", to_json(&report)?),
        _ => print!("{}", report),
    }

    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), CocoprepError> {
    let decode = args.root.is_some();
    let root = args.root.unwrap_or_default();
    let dataset = index::CocoDetection::new(root, &args.annotations)?;

    let opts = inspect::InspectOptions {
        index: args.index,
        decode: decode && args.index.is_some(),
    };
    let report = inspect::inspect_index(&dataset, &opts)?;

    match args.output.as_str() {
        "json" => println!("{}", to_json(&report)?),
        _ => print!("{}", report),
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CocoprepError> {
    serde_json::to_string_pretty(value).map_err(CocoprepError::ReportSerialize)
}
