//! filevol - command-line interface for file-backed loopback volumes.

mod cli;
mod commands;

use clap::Parser;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = filevol::util::init_tracing(cli.global.debug, cli.global.log_file.as_deref())?;

    tracing::debug!(command = ?cli.command, "Starting filevol");
    cli.command.execute(&cli.global)
}
