//! API gateway proxy envelope probe.
//!
//! # Usage
//!
//! ```bash
//! # Encode a request built from flags
//! lambdaproxy-probe encode --method POST --resource /books \
//!     -H 'Content-Type: application/json' --body '{"title":"x"}'
//!
//! # Decode a response envelope from stdin
//! lambdaproxy-probe decode --pretty < response.json
//!
//! # Print the envelope for a client error
//! lambdaproxy-probe status 404
//!
//! # Print the 500 envelope, logging the message as an error
//! lambdaproxy-probe status --error 'database unavailable'
//! ```
//!
//! # Environment Variables
//!
//! - `LAMBDAPROXY_PROBE_CONFIG` — Path to TOML configuration file (default: `probe.toml`)
//! - `RUST_LOG` — Log level filter (default: `info`)
//!
//! Variables may also be set in a `.env` file in the working directory. Logs go
//! to stderr; stdout carries only the command output.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lambdaproxy_probe::{Cli, ProbeConfig, ProbeError, execute};

fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        tracing::error!("Probe failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ProbeError> {
    let config = ProbeConfig::load_from(&cli.config)?;
    tracing::debug!(
        path = %cli.config.display(),
        method = %config.method,
        headers = config.headers.len(),
        "Loaded configuration"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(&cli.command, &config, &mut stdin.lock(), &mut stdout.lock())
}
