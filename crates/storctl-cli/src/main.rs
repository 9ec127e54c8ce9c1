#![warn(missing_docs)]

//! `storctl` binary: parses the command line and runs one command.

use std::io;

use anyhow::Result;
use clap::Parser;
use storctl_cli::cli::Cli;
use storctl_cli::commands::{self, Terminal};
use storctl_cli::env::EnvDefaults;
use storctl_cli::logging::init_logging;
use storctl_cli::prompt::TerminalReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.debug, &cli.global.log_level);

    let env = EnvDefaults::from_process();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut input = TerminalReader;
    let mut term = Terminal {
        out: &mut stdout,
        err: &mut stderr,
        input: &mut input,
    };

    commands::run(&cli, &env, &mut term).await?;
    Ok(())
}
