//! Console sample that takes a payment from an existing PaySimple customer.
//!
//! # Usage
//!
//! ```bash
//! # Run with default config (paysimple.toml in current directory)
//! cargo run -p paysimple-sample
//!
//! # Run with custom config path
//! CONFIG=/path/to/paysimple.toml cargo run -p paysimple-sample
//!
//! # Show gateway request logs on stderr
//! RUST_LOG=debug cargo run -p paysimple-sample
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` — Path to TOML configuration file (default: `paysimple.toml`)
//! - `PAYSIMPLE_USERNAME` / `PAYSIMPLE_API_KEY` / `PAYSIMPLE_API_URL` — Override the file
//! - `RUST_LOG` — Log level filter (default: `warn`)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use paysimple_http::HttpGatewayClient;
use tracing_subscriber::EnvFilter;

use paysimple_sample::Workflow;
use paysimple_sample::config::SampleConfig;
use paysimple_sample::console::{Console, StdConsole};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "CONFIG", default_value = "paysimple.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {e}");
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("Sample failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut console = StdConsole::stdio();

    let config = match SampleConfig::load_from(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            console.write_line(&e.to_string())?;
            return Ok(());
        }
    };
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            console.write_line(&e.to_string())?;
            return Ok(());
        }
    };
    tracing::info!(
        username = settings.username(),
        base_url = %settings.base_url(),
        account = ?config.default_account,
        "Loaded configuration"
    );

    let client = HttpGatewayClient::try_new(&settings)?.with_timeout(config.timeout());
    let mut workflow = Workflow::new(client, console, config.workflow_options());
    let exit = workflow.run().await?;

    tracing::info!(?exit, "Sample finished");
    Ok(())
}
