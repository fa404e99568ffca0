//! Wellness CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wellness_core::config::{AppConfig, LoggingConfig};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A broken config still gets logging; `config validate` reports the error.
    let logging = AppConfig::load(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging);

    if let Err(e) = cli.execute().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.pretty().init(),
    }
}
