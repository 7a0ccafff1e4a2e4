//! Saved-content collection engine.
//!
//! `stash` keeps a local, always-consistent picture of a user's saved content
//! (links, posts and videos collected through a messaging channel and stored by a
//! remote backend) and derives everything a dashboard needs from it:
//!
//! - A synchronized snapshot of the collection, refreshed on a fixed schedule
//! - Filtered and searched views over that snapshot
//! - Chart-ready statistics (category series, rankings, platform breakdown)
//! - A randomized "inspiration" picker with an animated settling sequence
//!
//! # Getting Started
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stash::{
//!   aggregate::Dashboard,
//!   config::Config,
//!   prelude::*,
//!   store::CollectionStore,
//!   view::{visible_items, ViewState},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load(Config::default_path()?)?;
//!   let store = Arc::new(CollectionStore::from_config(&config)?);
//!
//!   // Pull the collection once, then keep it fresh in the background
//!   store.refresh().await?;
//!   let mut schedule = store.start_polling(config.refresh_interval());
//!
//!   let snapshot = store.snapshot();
//!   let coding = visible_items(&snapshot.items, &ViewState::by_category("coding"));
//!   println!("{} coding items", coding.len());
//!
//!   let dashboard = Dashboard::compute(&snapshot, chrono::Utc::now());
//!   println!("{} saved this week", dashboard.summary.weekly);
//!
//!   schedule.stop();
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`content`]: Content items, categories, platforms and backend statistics
//! - [`display`]: Static display metadata for categories and platforms
//! - [`gateway`]: The remote backend contract and its HTTP implementation
//! - [`store`]: The collection snapshot and its refresh schedule
//! - [`view`]: Category and free-text filtering of a snapshot
//! - [`aggregate`]: Chart series and summary metrics
//! - [`sampler`]: The randomized inspiration picker
//! - [`config`]: File and environment configuration
//! - [`format`]: Human readable labels for timestamps and chart axes
//!
//! Only the [`store`] talks to the network; everything downstream of a snapshot is
//! pure and cannot fail.

#![warn(missing_docs)]

use std::{
  collections::BTreeMap,
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  sync::Arc,
  time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod aggregate;
pub mod config;
pub mod content;
pub mod display;
pub mod error;
pub mod format;
pub mod gateway;
pub mod sampler;
pub mod store;
pub mod view;

use crate::{content::*, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use stash::{gateway::HttpGateway, prelude::*};
///
/// async fn example() -> Result<(), StashError> {
///   let gateway = HttpGateway::new("http://localhost:8000")?;
///   let stats = gateway.get_stats("+15550100").await?;
///   println!("{} items", stats.total_contents);
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    content::{Category, ContentItem, Platform, Stats},
    error::StashError,
    gateway::Gateway,
  };
}
