//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::env::ENV_CONFIG_DIR;

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(name = "storctl", version)]
#[command(about = "Storage cluster operator CLI", long_about = None)]
pub struct Cli {
    /// Options placed before the subcommand.
    #[command(flatten)]
    pub global: GlobalOptions,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command; they go before the subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Control-plane address to connect to (only one allowed)
    #[arg(short = 'H', long = "host", value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Use TLS when connecting
    #[arg(long)]
    pub tls: bool,

    /// API username
    #[arg(short, long)]
    pub username: Option<String>,

    /// API password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Location of the client config directory
    #[arg(long = "config", value_name = "DIR", env = ENV_CONFIG_DIR)]
    pub config_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Logging level
    #[arg(
        short = 'l',
        long,
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage namespaces
    Namespace {
        /// Operation to run.
        #[command(subcommand)]
        cmd: NamespaceCmd,
    },
    /// Inspect cluster nodes
    Node {
        /// Operation to run.
        #[command(subcommand)]
        cmd: ReadCmd,
    },
    /// Inspect capacity pools
    Pool {
        /// Operation to run.
        #[command(subcommand)]
        cmd: ReadCmd,
    },
    /// Inspect access policies
    Policy {
        /// Operation to run.
        #[command(subcommand)]
        cmd: ReadCmd,
    },
    /// Inspect rules
    Rule {
        /// Operation to run.
        #[command(subcommand)]
        cmd: ReadCmd,
    },
    /// Manage users
    User {
        /// Operation to run.
        #[command(subcommand)]
        cmd: UserCmd,
    },
    /// Manage volumes
    Volume {
        /// Operation to run.
        #[command(subcommand)]
        cmd: VolumeCmd,
    },
    /// Store login credentials for a given host
    Login(LoginArgs),
    /// Show client and API version information
    Version,
}

/// Read-only operations shared by every resource kind.
#[derive(Subcommand, Debug, Clone)]
pub enum ReadCmd {
    /// Display detailed information on one or more resources; all when none are given
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
    /// List resources
    #[command(visible_alias = "list")]
    Ls(ListArgs),
}

/// Namespace operations.
#[derive(Subcommand, Debug, Clone)]
pub enum NamespaceCmd {
    /// Create a namespace
    Create(NamespaceCreateArgs),
    /// Display detailed information on one or more namespaces
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
    /// List namespaces
    #[command(visible_alias = "list")]
    Ls(ListArgs),
}

/// Volume operations.
#[derive(Subcommand, Debug, Clone)]
pub enum VolumeCmd {
    /// Create a volume
    Create(VolumeCreateArgs),
    /// Display detailed information on one or more volumes
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
    /// List volumes
    #[command(visible_alias = "list")]
    Ls(ListArgs),
}

/// User operations.
#[derive(Subcommand, Debug, Clone)]
pub enum UserCmd {
    /// Create a user
    Create(UserCreateArgs),
    /// Display detailed information on one or more users
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
    /// List users
    #[command(visible_alias = "list")]
    Ls(ListArgs),
}

/// Arguments of `inspect`.
#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    /// Resources to inspect
    #[arg(value_name = "REF")]
    pub targets: Vec<String>,

    /// Format the output using the given template
    #[arg(short, long, default_value = "")]
    pub format: String,
}

/// Arguments of `ls`.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only display references
    #[arg(short, long)]
    pub quiet: bool,

    /// Format the output using the given template
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments of `namespace create`.
#[derive(Args, Debug, Clone, Default)]
pub struct NamespaceCreateArgs {
    /// Name of the namespace
    pub name: String,

    /// Human-friendly name
    #[arg(long)]
    pub display_name: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Label in key=value form (repeatable)
    #[arg(long = "label", value_name = "KEY=VALUE", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
}

/// Arguments of `volume create`.
#[derive(Args, Debug, Clone, Default)]
pub struct VolumeCreateArgs {
    /// Volume reference, [NAMESPACE/]NAME
    #[arg(value_name = "VOLUME")]
    pub reference: String,

    /// Size in GiB
    #[arg(short, long, default_value_t = 5)]
    pub size: u64,

    /// Capacity pool to provision from
    #[arg(long)]
    pub pool: Option<String>,

    /// Filesystem to create on the volume
    #[arg(long)]
    pub fs_type: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Label in key=value form (repeatable)
    #[arg(long = "label", value_name = "KEY=VALUE", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
}

/// Arguments of `user create`.
#[derive(Args, Debug, Clone, Default)]
pub struct UserCreateArgs {
    /// Username of the new account
    #[arg(value_name = "USERNAME")]
    pub name: Option<String>,

    /// Same as the positional USERNAME
    #[arg(long, hide = true)]
    pub username: Option<String>,

    /// Prompt for a password (interactive)
    #[arg(long)]
    pub password: bool,

    /// Role, either user or admin
    #[arg(long, default_value = "user")]
    pub role: String,

    /// Groups, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub groups: Vec<String>,
}

/// Arguments of `login`.
#[derive(Args, Debug, Clone, Default)]
pub struct LoginArgs {
    /// The host to store the credentials for
    #[arg(value_name = "HOST")]
    pub host: Option<String>,

    /// The host to store the credentials for
    #[arg(long = "host", hide = true)]
    pub host_flag: Option<String>,

    /// The username to use for this host
    #[arg(long)]
    pub username: Option<String>,

    /// The password to use for this host
    #[arg(long)]
    pub password: Option<String>,
}

fn parse_label(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("invalid label {s:?}: expected key=value")),
    }
}
