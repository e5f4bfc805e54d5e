// slotwatch - rental status panel

mod cli;
mod config;
mod error;
mod expiry;
mod models;
mod panel;
mod session;
mod store;
mod ui;

use clap::Parser;
use error::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    if args.command.is_none() {
        // The TUI owns the terminal, so logs go to a file
        let log_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("slotwatch");
        std::fs::create_dir_all(&log_dir)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("slotwatch.log"))?;

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
            )
            .with_writer(Mutex::new(file).with_max_level(tracing::Level::TRACE))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    cli::execute(args).await
}
