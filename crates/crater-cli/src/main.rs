mod commands;
mod progress;
mod summary;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crater_core::error::CraterError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crater", about = "Crater detection and cataloging tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect craters in an image and add them to the catalog
    Detect(commands::detect::DetectArgs),
    /// Check whether an image is already cataloged
    Lookup(commands::lookup::LookupArgs),
    /// Summarize the catalog
    Catalog(commands::catalog::CatalogArgs),
    /// Write the binarized image the detectors see
    Preprocess(commands::preprocess::PreprocessArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match &cli.command {
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Lookup(args) => commands::lookup::run(args),
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Preprocess(args) => commands::preprocess::run(args),
        Commands::Config(args) => commands::config::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            summary::print_error(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// 2 for image-load failures, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    let image_load = err
        .chain()
        .filter_map(|e| e.downcast_ref::<CraterError>())
        .any(CraterError::is_image_load);
    if image_load {
        2
    } else {
        1
    }
}
