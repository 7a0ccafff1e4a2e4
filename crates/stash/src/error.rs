//! Error types for the stash library.
//!
//! Every fallible boundary in the crate returns [`StashError`]:
//! - Gateway requests (transport failures and non-success responses)
//! - Response decoding
//! - Configuration loading and validation
//!
//! The pure components (view filtering, aggregation, sampling) never fail and
//! therefore never produce one of these.
//!
//! # Examples
//!
//! ```no_run
//! use stash::{gateway::HttpGateway, prelude::*};
//!
//! # async fn example() -> Result<(), StashError> {
//! let gateway = HttpGateway::new("http://localhost:8000")?;
//! match gateway.delete_content(42).await {
//!   Err(StashError::NotFound) => println!("Already gone"),
//!   Err(StashError::Network(e)) => println!("Network error: {}", e),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(()) => println!("Deleted"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`stash`](crate) crate.
pub type Result<T> = core::result::Result<T, StashError>;

/// Errors that can occur when working with the stash library.
#[derive(Error, Debug)]
pub enum StashError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The backend is unreachable
  /// - The request times out
  /// - TLS errors occur
  /// - The response body could not be decoded as the expected JSON
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The backend answered with a non-success status.
  ///
  /// `message` carries the backend's `detail` field when present, otherwise the
  /// raw body.
  #[error("API error ({status}): {message}")]
  Api {
    /// HTTP status code returned by the backend
    status:  u16,
    /// Human readable failure description
    message: String,
  },

  /// The requested item does not exist on the backend.
  #[error("Content not found")]
  NotFound,

  /// A JSON payload could not be decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A gateway URL could not be constructed.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// The configuration file is not valid TOML for [`Config`](crate::config::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration is present but unusable.
  #[error("{0}")]
  Config(String),
}

impl StashError {
  /// Whether this failure is worth retrying on the next scheduled refresh.
  ///
  /// Transport problems and server-side errors are transient; a missing item or a
  /// broken configuration is not.
  pub fn is_transient(&self) -> bool {
    match self {
      Self::Network(_) => true,
      Self::Api { status, .. } => *status >= 500,
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_transient_classification() {
    assert!(StashError::Api { status: 503, message: "busy".into() }.is_transient());
    assert!(!StashError::Api { status: 400, message: "bad".into() }.is_transient());
    assert!(!StashError::NotFound.is_transient());
    assert!(!StashError::Config("nope".into()).is_transient());
  }

  #[test]
  fn test_api_error_display() {
    let err = StashError::Api { status: 500, message: "database down".into() };
    assert_eq!(err.to_string(), "API error (500): database down");
  }
}
