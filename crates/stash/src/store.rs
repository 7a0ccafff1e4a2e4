//! The collection snapshot and its refresh schedule.
//!
//! A [`CollectionStore`] owns the one authoritative local copy of a user's
//! collection. The copy is an immutable [`CollectionSnapshot`] behind an [`Arc`];
//! every successful refresh builds a new snapshot and swaps it in whole, so a
//! reader never sees items from one sync paired with stats from another.
//!
//! Refreshes may overlap (a scheduled refresh racing a refresh triggered by a
//! delete). Each refresh takes a sequence number when it is issued and its result
//! is only applied if nothing newer has been applied already.
//!
//! # Examples
//!
//! ```
//! use stash::{content::ContentItem, gateway::MemoryGateway, store::CollectionStore};
//!
//! # tokio_test::block_on(async {
//! let gateway = MemoryGateway::with_items(vec![
//!   ContentItem::new(2, "https://b.example"),
//!   ContentItem::new(1, "https://a.example"),
//! ]);
//! let store = CollectionStore::new(gateway, "+15550100");
//!
//! store.refresh().await.unwrap();
//! assert_eq!(store.snapshot().items.len(), 2);
//!
//! store.delete_item(2).await.unwrap();
//! assert_eq!(store.snapshot().items.len(), 1);
//! assert_eq!(store.snapshot().stats.total_contents, 1);
//! # });
//! ```

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::{
  task::JoinHandle,
  time::{self, Instant, MissedTickBehavior},
};

use super::*;
use crate::{
  config::Config,
  gateway::{Gateway, HttpGateway, ListQuery},
};

/// One consistent view of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
  /// Items, newest first, exactly as the backend listed them
  pub items:          Arc<[ContentItem]>,
  /// Backend statistics fetched alongside `items`
  pub stats:          Stats,
  /// When `items` and `stats` were applied, `None` before the first sync
  pub last_synced_at: Option<DateTime<Utc>>,
  /// Whether a refresh is currently running
  pub loading:        bool,
  /// Message of the most recent failed refresh, cleared by the next success
  pub last_error:     Option<String>,
  /// Sequence number of the refresh that produced `items` and `stats`
  pub sequence:       u64,
}

impl Default for CollectionSnapshot {
  fn default() -> Self {
    Self {
      items:          Arc::from(Vec::new()),
      stats:          Stats::default(),
      last_synced_at: None,
      loading:        false,
      last_error:     None,
      sequence:       0,
    }
  }
}

impl CollectionSnapshot {
  /// A snapshot holding `items` and `stats`, as if freshly synced.
  pub fn new(items: Vec<ContentItem>, stats: Stats) -> Self {
    Self { items: Arc::from(items), stats, last_synced_at: Some(Utc::now()), ..Self::default() }
  }

  /// Whether no items are held.
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Looks up an item by identifier.
  pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
    self.items.iter().find(|item| item.id == id)
  }
}

/// Holds the current snapshot and keeps it in sync with a [`Gateway`].
#[derive(Debug)]
pub struct CollectionStore<G = HttpGateway> {
  gateway:   G,
  user_id:   String,
  snapshot:  watch::Sender<Arc<CollectionSnapshot>>,
  /// Highest sequence number handed out so far
  issued:    AtomicU64,
  /// Refreshes currently running
  in_flight: AtomicUsize,
}

impl CollectionStore<HttpGateway> {
  /// Builds a store talking HTTP to the configured backend.
  pub fn from_config(config: &Config) -> Result<Self> {
    Ok(Self::new(HttpGateway::from_config(config)?, config.user_id.clone()))
  }
}

impl<G: Gateway> CollectionStore<G> {
  /// Creates a store for `user_id` with an empty snapshot.
  pub fn new(gateway: G, user_id: impl Into<String>) -> Self {
    let (snapshot, _) = watch::channel(Arc::new(CollectionSnapshot::default()));
    Self {
      gateway,
      user_id: user_id.into(),
      snapshot,
      issued: AtomicU64::new(0),
      in_flight: AtomicUsize::new(0),
    }
  }

  /// The current snapshot.
  pub fn snapshot(&self) -> Arc<CollectionSnapshot> { self.snapshot.borrow().clone() }

  /// A receiver notified every time the snapshot is replaced.
  pub fn subscribe(&self) -> watch::Receiver<Arc<CollectionSnapshot>> { self.snapshot.subscribe() }

  /// The user whose collection is held.
  pub fn user_id(&self) -> &str { &self.user_id }

  /// The gateway this store syncs through.
  pub fn gateway(&self) -> &G { &self.gateway }

  /// Fetches the full list and the stats concurrently and applies both together.
  ///
  /// On failure the previous items and stats stay in place, the error message is
  /// recorded in [`CollectionSnapshot::last_error`] and the error is returned. A
  /// result that arrives after a newer refresh has already been applied is
  /// discarded.
  pub async fn refresh(&self) -> Result<()> {
    let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
    let _in_flight = InFlight::enter(self);
    debug!("Refresh #{} for user {:?}", sequence, self.user_id);

    let query = ListQuery::default();
    let fetched = tokio::try_join!(
      self.gateway.list_content(&self.user_id, &query),
      self.gateway.get_stats(&self.user_id),
    );

    match fetched {
      Ok((list, stats)) => {
        self.apply(sequence, list.contents, stats);
        Ok(())
      },
      Err(e) => {
        warn!("Refresh #{} failed: {}", sequence, e);
        self.snapshot.send_if_modified(|current| {
          if sequence < current.sequence {
            return false;
          }
          let mut next = CollectionSnapshot::clone(current);
          next.last_error = Some(e.to_string());
          *current = Arc::new(next);
          true
        });
        Err(e)
      },
    }
  }

  /// Deletes one item on the backend, then refreshes.
  ///
  /// The local snapshot is never edited directly: on success the item disappears
  /// with the refresh, on failure the error is returned and nothing changes. A
  /// failed follow-up refresh is logged and recorded in the snapshot but does not
  /// turn the completed delete into an error.
  pub async fn delete_item(&self, id: ContentId) -> Result<()> {
    if let Err(e) = self.gateway.delete_content(id).await {
      warn!("Deleting content {} failed: {}", id, e);
      return Err(e);
    }
    info!("Deleted content {}", id);
    if let Err(e) = self.refresh().await {
      warn!("Refresh after deleting {} failed: {}", id, e);
    }
    Ok(())
  }

  fn apply(&self, sequence: u64, items: Vec<ContentItem>, stats: Stats) {
    let count = items.len();
    let applied = self.snapshot.send_if_modified(|current| {
      if sequence < current.sequence {
        return false;
      }
      *current = Arc::new(CollectionSnapshot {
        items: Arc::from(items),
        stats,
        last_synced_at: Some(Utc::now()),
        loading: current.loading,
        last_error: None,
        sequence,
      });
      true
    });
    if applied {
      trace!("Applied refresh #{} with {} items", sequence, count);
    } else {
      debug!("Discarded stale refresh #{}", sequence);
    }
  }
}

impl<G: Gateway + 'static> CollectionStore<G> {
  /// Refreshes every `period` in a background task until the schedule is stopped.
  ///
  /// The first scheduled refresh happens one full `period` from now; call
  /// [`refresh`](Self::refresh) first for an immediate sync. Scheduled refreshes
  /// never overlap each other, and stopping the schedule abandons one that is in
  /// progress without applying its result.
  pub fn start_polling(self: &Arc<Self>, period: Duration) -> RefreshSchedule {
    let token = CancellationToken::new();
    let handle = tokio::spawn(poll(Arc::clone(self), period, token.clone()));
    info!("Refreshing every {:?}", period);
    RefreshSchedule { token, handle: Some(handle) }
  }
}

async fn poll<G: Gateway>(store: Arc<CollectionStore<G>>, period: Duration, cancel: CancellationToken) {
  let mut ticker = time::interval_at(Instant::now() + period, period);
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    tokio::select! {
      biased;
      _ = cancel.cancelled() => break,
      _ = ticker.tick() => {},
    }
    tokio::select! {
      biased;
      _ = cancel.cancelled() => break,
      // Failures are already logged and recorded; the next tick retries.
      _ = store.refresh() => {},
    }
  }
  debug!("Refresh schedule stopped");
}

/// Marks the snapshot as loading while at least one refresh runs.
struct InFlight<'a> {
  count:    &'a AtomicUsize,
  snapshot: &'a watch::Sender<Arc<CollectionSnapshot>>,
}

impl<'a> InFlight<'a> {
  fn enter<G>(store: &'a CollectionStore<G>) -> Self {
    store.in_flight.fetch_add(1, Ordering::SeqCst);
    set_loading(&store.snapshot, true);
    Self { count: &store.in_flight, snapshot: &store.snapshot }
  }
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
      set_loading(self.snapshot, false);
    }
  }
}

fn set_loading(snapshot: &watch::Sender<Arc<CollectionSnapshot>>, loading: bool) {
  snapshot.send_if_modified(|current| {
    if current.loading == loading {
      return false;
    }
    let mut next = CollectionSnapshot::clone(current);
    next.loading = loading;
    *current = Arc::new(next);
    true
  });
}

/// Handle to a running refresh schedule.
///
/// Dropping the handle stops the schedule.
#[derive(Debug)]
pub struct RefreshSchedule {
  token:  CancellationToken,
  handle: Option<JoinHandle<()>>,
}

impl RefreshSchedule {
  /// Stops the schedule. Calling this more than once has no further effect.
  pub fn stop(&mut self) {
    if !self.token.is_cancelled() {
      self.token.cancel();
      debug!("Refresh schedule cancelled");
    }
  }

  /// Stops the schedule and waits for the background task to finish.
  pub async fn shutdown(mut self) {
    self.stop();
    if let Some(handle) = self.handle.take() {
      if let Err(e) = handle.await {
        warn!("Refresh schedule task failed: {}", e);
      }
    }
  }

  /// Whether the schedule is still active.
  pub fn is_running(&self) -> bool {
    !self.token.is_cancelled() && self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
  }
}

impl Drop for RefreshSchedule {
  fn drop(&mut self) { self.token.cancel(); }
}
