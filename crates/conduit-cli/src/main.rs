//! Conduit CLI: run one image job from the command line.
//!
//! Configuration comes from the environment (and `.env`). See `conduit config`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use conduit_cli::{init_tracing, read_job, ConfigView};
use conduit_core::AdapterConfig;
use conduit_handler::{handle, PassthroughPipeline};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "conduit", about = "Image job adapter CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job document through the passthrough pipeline
    Run {
        /// Path to the job JSON (stdin when omitted)
        #[arg(long)]
        job: Option<PathBuf>,
        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration with credentials redacted
    Config,
}

fn print_json(value: &impl Serialize, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { job, pretty } => {
            let document = match job {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    read_job(file)?
                }
                None => read_job(std::io::stdin().lock())?,
            };

            let config = AdapterConfig::from_env();
            let pipeline = PassthroughPipeline::new(&config.output_dir);
            let response = handle(document, &config, &pipeline).await;
            print_json(&response, pretty)?;

            if response.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Config => {
            let config = AdapterConfig::from_env();
            print_json(&ConfigView::from(&config), true)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
