//! Command line shell for a saved-content collection.
//!
//! This crate provides the `stash` binary, a terminal front end for the `stash`
//! library. It supports:
//! - Writing a configuration file for the backend and user
//! - Listing, filtering and searching saved content
//! - Collection statistics with category and platform breakdowns
//! - Deleting content after confirmation
//! - A random "inspire me" pick
//! - A live view that refreshes on a fixed schedule
//!
//! # Usage
//!
//! ```bash
//! # Point the shell at a backend and user
//! stash init --api-url http://localhost:8000 --user-id +15550100
//!
//! # Everything in the coding category
//! stash list --category coding
//!
//! # Free-text search over titles, descriptions, summaries and tags
//! stash list --search "sourdough"
//!
//! # Charts and headline numbers
//! stash stats
//!
//! # Something random to look at
//! stash inspire
//! ```
//!
//! Destructive operations ask for confirmation unless `--accept-defaults` is
//! passed. Logging detail increases with each `-v`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use chrono::{DateTime, Utc};
use clap::{builder::ArgAction, Args, Parser, Subcommand};
use stash::{
  aggregate::Dashboard,
  config::{Config, USER_ID_ENV},
  content::ContentId,
  prelude::*,
  sampler::SamplerConfig,
  store::CollectionStore,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Browse, search and tidy a saved-content collection")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The configuration file this invocation reads or writes.
  fn config_path(&self) -> Result<PathBuf> {
    match &self.config {
      Some(path) => Ok(path.clone()),
      None => Ok(Config::default_path()?),
    }
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used (0-4)
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so that they never
/// interleave with command output.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Loads the configuration and opens a store over the configured backend.
fn open_store(cli: &Cli) -> Result<(Config, Arc<CollectionStore>)> {
  let path = cli.config_path()?;
  let config = Config::load(&path)?;
  debug!("Using backend {} for user {:?}", config.api_url, config.user_id);
  let store = Arc::new(CollectionStore::from_config(&config)?);
  Ok((config, store))
}

/// Resolves once the user presses Ctrl-C.
async fn interrupted() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    debug!("Could not listen for Ctrl-C: {}", e);
    std::future::pending::<()>().await;
  }
}

/// Runs the parsed command.
async fn run(cli: &Cli) -> Result<()> {
  trace!("Running {:?}", std::env::args().collect::<Vec<_>>());
  match cli.command.clone() {
    Commands::Init(options) => init(cli, &cli.config_path()?, options).await,
    Commands::List(options) => list(cli, &open_store(cli)?.1, options).await,
    Commands::Show { id } => show(cli, &open_store(cli)?.1, id).await,
    Commands::Stats => stats(cli, &open_store(cli)?.1).await,
    Commands::Delete(options) => delete(cli, &open_store(cli)?.1, options).await,
    Commands::Inspire(options) => {
      let (config, store) = open_store(cli)?;
      inspire(cli, &store, SamplerConfig::from(&config), options).await
    },
    Commands::Watch => {
      let (config, store) = open_store(cli)?;
      watch(cli, store, config.refresh_interval(), interrupted()).await
    },
  }
}

/// Entry point for the `stash` CLI application
///
/// Parses arguments, sets up logging and runs the requested command. Any error
/// is printed with the error prefix and turns into a non-zero exit status.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(&cli).await {
    if let Err(e) = cli.reply(ResponseContent::Error(e)) {
      eprintln!("{ERROR_PREFIX}{e}");
    }
    std::process::exit(1);
  }
}
