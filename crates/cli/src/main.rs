mod cmd;
mod output;
mod value;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fsattr_core::LinkOption;
use fsattr_platform::Provider;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// fsattr - Inspect and modify file attributes through attribute views
#[derive(Parser)]
#[command(name = "fsattr")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging (RUST_LOG takes precedence)
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Operate on symbolic links themselves instead of their targets
  #[arg(long, global = true)]
  no_follow: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text, global = true)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the attribute views available on this system
  Views,

  /// Read attributes
  Get {
    path: PathBuf,

    /// Attribute specs such as `size`, `posix:*` or `unix:mode,nlink`
    #[arg(default_value = "basic:*")]
    specs: Vec<String>,
  },

  /// Write a single attribute
  Set {
    path: PathBuf,

    /// Attribute spec naming exactly one attribute, e.g. `posix:permissions`
    spec: String,

    /// New value (times as RFC 3339, permissions as rwxr-x---, modes in octal)
    value: String,
  },

  /// Manage user-defined extended attributes
  Xattr {
    #[command(subcommand)]
    action: XattrCommand,
  },
}

#[derive(Subcommand)]
enum XattrCommand {
  /// List attribute names
  List { path: PathBuf },

  /// Print an attribute value
  Get { path: PathBuf, name: String },

  /// Write an attribute value
  Set { path: PathBuf, name: String, value: String },

  /// Remove an attribute
  Rm { path: PathBuf, name: String },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let provider = Provider::new();
  debug!(family = %provider.family(), no_follow = cli.no_follow, "starting");
  let options: &[LinkOption] = if cli.no_follow {
    &[LinkOption::NoFollowLinks]
  } else {
    &[]
  };
  let format = cli.format;

  match cli.command {
    Commands::Views => cmd::cmd_views(&provider, format),
    Commands::Get { path, specs } => cmd::cmd_get(&provider, &path, &specs, options, format),
    Commands::Set { path, spec, value } => cmd::cmd_set(&provider, &path, &spec, &value, options, format),
    Commands::Xattr { action } => match action {
      XattrCommand::List { path } => cmd::cmd_xattr_list(&provider, &path, options, format),
      XattrCommand::Get { path, name } => cmd::cmd_xattr_get(&provider, &path, &name, options, format),
      XattrCommand::Set { path, name, value } => cmd::cmd_xattr_set(&provider, &path, &name, &value, options, format),
      XattrCommand::Rm { path, name } => cmd::cmd_xattr_rm(&provider, &path, &name, options, format),
    },
  }
}
