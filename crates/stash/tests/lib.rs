use std::{error::Error, fs::read_to_string, sync::Arc, time::Duration};

use chrono::{DateTime, TimeZone, Utc};
use stash::{
  aggregate::Dashboard,
  content::{ContentList, Stats},
  gateway::MemoryGateway,
  prelude::*,
  sampler::{Sampler, SamplerConfig, SamplerState},
  store::CollectionStore,
  view::{visible_items, ViewState},
};
use tracing_test::traced_test;

mod workflows;

pub type TestResult<T> = Result<T, Box<dyn Error>>;

/// The backend list response stored under `tests/.data`.
pub fn fixture_list() -> ContentList {
  let json = read_to_string("tests/.data/contents.json").expect("Failed to read contents fixture");
  serde_json::from_str(&json).expect("Failed to decode contents fixture")
}

/// The backend stats response stored under `tests/.data`.
pub fn fixture_stats() -> Stats {
  let json = read_to_string("tests/.data/stats.json").expect("Failed to read stats fixture");
  serde_json::from_str(&json).expect("Failed to decode stats fixture")
}

/// The instant the fixture dashboard is evaluated at.
pub fn fixture_now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap() }

/// A store over the fixture collection, already synced once.
pub async fn create_test_store() -> Arc<CollectionStore<MemoryGateway>> {
  let gateway = MemoryGateway::with_items(fixture_list().contents);
  let store = Arc::new(CollectionStore::new(gateway, "+15550100"));
  store.refresh().await.unwrap();
  store
}
