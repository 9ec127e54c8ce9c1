//! Command handlers. Every resource command goes through the shared
//! retrieval in [`crate::inspect`]; `login` and `version` run without a
//! session.

use std::io::Write;

use tracing::debug;

use crate::cli::{Cli, Command, GlobalOptions, ReadCmd};
use crate::config::{self, ConfigFile};
use crate::env::EnvDefaults;
use crate::error::Result;
use crate::inspect::{inspect, list, InspectSource};
use crate::prompt::PasswordReader;
use crate::session::Session;

pub mod login;
pub mod namespace;
pub mod node;
pub mod policy;
pub mod pool;
pub mod rule;
pub mod user;
pub mod version;
pub mod volume;

/// Process streams handed to command handlers.
pub struct Terminal<'a> {
    /// Command output.
    pub out: &'a mut dyn Write,
    /// Warnings and diagnostics.
    pub err: &'a mut dyn Write,
    /// Answers to password prompts.
    pub input: &'a mut dyn PasswordReader,
}

/// Runs one parsed invocation to completion.
pub async fn run(cli: &Cli, env: &EnvDefaults, term: &mut Terminal<'_>) -> Result<()> {
    let dir = config::config_dir(cli.global.config_dir.as_deref());
    let mut config = config::load_or_default(&dir, term.err)?;
    debug!(config = %config.filename().display(), "config loaded");

    match &cli.command {
        Command::Login(args) => login::run(&cli.global, args, &mut config, env, term.out).await,
        Command::Version => version::run(&cli.global, env, term.out),
        Command::Namespace { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            namespace::run(session.client(), cmd, term.out).await
        }
        Command::Node { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            read(&node::NodeSource::new(session.client()), cmd, term.out).await
        }
        Command::Pool { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            read(&pool::PoolSource::new(session.client()), cmd, term.out).await
        }
        Command::Policy { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            read(&policy::PolicySource::new(session.client()), cmd, term.out).await
        }
        Command::Rule { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            read(&rule::RuleSource::new(session.client()), cmd, term.out).await
        }
        Command::User { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            user::run(session.client(), cmd, term).await
        }
        Command::Volume { cmd } => {
            let session = connect(&cli.global, &config, env)?;
            volume::run(session.client(), cmd, term.out).await
        }
    }
}

fn connect(global: &GlobalOptions, config: &ConfigFile, env: &EnvDefaults) -> Result<Session> {
    let session = Session::from_options(global, config, env)?;
    debug!(endpoint = %session.endpoint(), version = session.version(), "connected");
    Ok(session)
}

/// `inspect` and `ls` for kinds without extra subcommands.
pub async fn read<S: InspectSource + ?Sized>(
    source: &S,
    cmd: &ReadCmd,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        ReadCmd::Inspect(args) => inspect(source, &args.targets, &args.format, out).await,
        ReadCmd::Ls(args) => list(source, args.quiet, args.format.as_deref(), out).await,
    }
}
