#![warn(clippy::uninlined_format_args)]

mod config;
mod error;
mod presenter;
mod source;

use std::{env, process};

use billsplit_application::WorkspaceProcessor;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{AppConfig, OutputFormat},
    error::CliError,
    presenter::TextReport,
    source::JsonLedgerFile,
};

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    let Some(path) = env::args().nth(1) else {
        return Err(CliError::Usage);
    };

    let config = AppConfig::from_env()?;
    tracing::debug!(
        rounding_mode = ?config.rounding_mode,
        output = ?config.output,
        "Configuration loaded"
    );

    let processor = WorkspaceProcessor::new(config.settlement_context());
    let report = processor.process(&JsonLedgerFile::new(path))?;

    match config.output {
        OutputFormat::Text => print!("{}", TextReport(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
