//! Alpha command-line tool
//!
//! Inspects class manifests and constructs instances from them.

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alpha")]
#[command(about = "Alpha class manifest toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter (overrides ALPHA_LOG), e.g. "debug" or "alpha_core=trace"
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the classes declared in a manifest
    Inspect {
        /// Manifest file
        #[arg(default_value = "classes.toml")]
        manifest: PathBuf,
    },

    /// Construct an instance and print its fields
    New {
        /// Manifest file
        manifest: PathBuf,
        /// Class to instantiate
        class: String,
        /// Constructor data as a JSON object
        #[arg(short, long, conflicts_with = "data_file")]
        data: Option<String>,
        /// Read constructor data from a JSON file
        #[arg(long)]
        data_file: Option<PathBuf>,
        /// Assign a field after construction (key=value, value parsed as JSON)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log.as_deref());

    let result = match cli.command {
        Commands::Inspect { manifest } => commands::inspect::execute(&manifest),
        Commands::New {
            manifest,
            class,
            data,
            data_file,
            assignments,
        } => commands::new::execute(commands::new::NewOptions {
            manifest,
            class,
            data,
            data_file,
            assignments,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
