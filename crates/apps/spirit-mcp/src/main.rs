//! Spirit Protocol MCP server binary.
//!
//! stdout carries the MCP protocol; logs and diagnostics go to stderr.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spirit_chain::SpiritClient;
use spirit_mcp::{cli::Cli, run_server};

const VERBOSE_DIRECTIVE: &str = "spirit=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!(error = %e, "MCP server failed");
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

/// Install a stderr subscriber when `--verbose` or `RUST_LOG` asks for one.
fn init_logging(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok().filter(|v| !v.is_empty());
    let filter = match (verbose, rust_log) {
        (true, Some(base)) => EnvFilter::new(format!("{},{}", base, VERBOSE_DIRECTIVE)),
        (true, None) => EnvFilter::new(VERBOSE_DIRECTIVE),
        (false, Some(_)) => EnvFilter::from_default_env(),
        (false, None) => return,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = cli.into_config();
    let client = SpiritClient::new(&config)?;
    run_server(client).await
}
