//! qcanvas Command-Line Interface
//!
//! Watch a streaming optimizer redraw its best circuit, or render a single
//! frame to SVG.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{render, version, watch};
use config::CliConfig;

/// qcanvas - streaming quantum circuit canvas
#[derive(Parser)]
#[command(name = "qcanvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.qcanvas/config.yaml when present)
    #[arg(long, global = true, env = "QCANVAS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a run and redraw the circuit as frames arrive
    Watch {
        /// Streaming endpoint
        #[arg(short, long, env = "QCANVAS_ENDPOINT")]
        endpoint: Option<String>,

        /// Number of qubit lines (non-numeric input falls back to 3)
        #[arg(short, long)]
        qubits: Option<String>,

        /// problemInput as JSON
        #[arg(long, default_value = "{}")]
        problem_input: String,

        /// wantOutput as JSON
        #[arg(long, default_value = "{}")]
        want_output: String,

        /// Write the final canvas as SVG
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Write a JSON run report
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Render one frame to SVG
    Render {
        /// Frame JSON file ('-' for stdin)
        #[arg(short, long)]
        input: String,

        /// Number of qubit lines (non-numeric input falls back to 3)
        #[arg(short, long)]
        qubits: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Watch {
            endpoint,
            qubits,
            problem_input,
            want_output,
            snapshot,
            report,
        } => match CliConfig::load(cli.config.as_deref()) {
            Ok(config) => {
                let options = watch::WatchOptions {
                    endpoint: config.endpoint(endpoint.as_deref()),
                    qubits: config.qubit_input(qubits),
                    problem_input,
                    want_output,
                    snapshot,
                    report,
                };
                watch::execute(&config, options).await
            }
            Err(e) => Err(e),
        },

        Commands::Render {
            input,
            qubits,
            output,
        } => CliConfig::load(cli.config.as_deref()).and_then(|config| {
            let qubits = config.qubit_input(qubits);
            render::execute(&config, &input, qubits.as_deref(), output.as_deref())
        }),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
