//! Error types for the `stash` command line shell.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, StashdError>;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum StashdError {
  /// Failure inside the collection engine (network, backend or configuration).
  #[error(transparent)]
  Stash(#[from] StashError),

  /// Terminal prompt failure.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Terminal or file system failure.
  #[error(transparent)]
  IO(#[from] std::io::Error),

  /// Arguments that parse but cannot be acted upon.
  #[error("{0}")]
  Usage(String),
}
