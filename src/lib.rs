//! Multi-format document previewer
//!
//! Files are vetted at intake, classified once, extracted into a uniform
//! shape (plain text, table or slides) and previewed one at a time with
//! case-insensitive search and highlighting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractors;
pub mod format;
pub mod handle;
pub mod intake;
pub mod models;
pub mod preview;
pub mod search;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use clap::Parser;

/// Entry point of the `docpreview` binary
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    match cli::execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
