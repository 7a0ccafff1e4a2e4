//! In-process gateway backed by a plain vector.

use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Mutex, MutexGuard,
};

use super::*;
use crate::view::matches_search;

/// Gateway that serves a collection held in memory.
///
/// Stats are derived from the held items the same way the backend derives them.
/// Reads and deletes can be made to fail on demand, which is how sync and
/// mutation failures are exercised in tests.
///
/// # Examples
///
/// ```
/// use stash::{
///   content::{Category, ContentItem},
///   gateway::{ListQuery, MemoryGateway},
///   prelude::*,
/// };
///
/// # tokio_test::block_on(async {
/// let gateway = MemoryGateway::with_items(vec![
///   ContentItem::new(1, "https://a.example").with_category(Category::Food),
///   ContentItem::new(2, "https://b.example"),
/// ]);
/// let stats = gateway.get_stats("anyone").await.unwrap();
/// assert_eq!(stats.count(Category::Food), 1);
///
/// gateway.delete_content(1).await.unwrap();
/// let list = gateway.list_content("anyone", &ListQuery::default()).await.unwrap();
/// assert_eq!(list.contents.len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryGateway {
  /// The collection, newest first
  items:        Mutex<Vec<ContentItem>>,
  /// Whether list/stats/get requests fail
  fail_reads:   AtomicBool,
  /// Whether delete requests fail
  fail_deletes: AtomicBool,
  /// Number of list requests served or refused
  list_calls:   AtomicUsize,
}

impl MemoryGateway {
  /// Creates an empty gateway.
  pub fn new() -> Self { Self::default() }

  /// Creates a gateway serving `items` in the given order.
  pub fn with_items(items: Vec<ContentItem>) -> Self {
    Self { items: Mutex::new(items), ..Self::default() }
  }

  /// Adds an item at the front, as the newest entry.
  pub fn insert(&self, item: ContentItem) { self.lock().insert(0, item); }

  /// Replaces the whole collection.
  pub fn replace(&self, items: Vec<ContentItem>) { *self.lock() = items; }

  /// Makes list, stats and get requests fail (or succeed again).
  pub fn set_fail_reads(&self, fail: bool) { self.fail_reads.store(fail, Ordering::SeqCst); }

  /// Makes delete requests fail (or succeed again).
  pub fn set_fail_deletes(&self, fail: bool) { self.fail_deletes.store(fail, Ordering::SeqCst); }

  /// How many list requests have been received.
  pub fn list_calls(&self) -> usize { self.list_calls.load(Ordering::SeqCst) }

  /// Number of items currently held.
  pub fn len(&self) -> usize { self.lock().len() }

  /// Whether the collection is empty.
  pub fn is_empty(&self) -> bool { self.lock().is_empty() }

  fn lock(&self) -> MutexGuard<'_, Vec<ContentItem>> {
    // A poisoned lock only means a test panicked mid-update; the data is still usable.
    self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  fn check_reads(&self) -> Result<()> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(StashError::Api { status: 503, message: "backend unavailable".into() });
    }
    Ok(())
  }
}

#[async_trait]
impl Gateway for MemoryGateway {
  async fn list_content(&self, _user_id: &str, query: &ListQuery) -> Result<ContentList> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    self.check_reads()?;
    let needle = query.search.as_deref().map(str::to_lowercase).filter(|term| !term.is_empty());
    let contents: Vec<ContentItem> = self
      .lock()
      .iter()
      .filter(|item| query.category.map_or(true, |category| item.category == category))
      .filter(|item| needle.as_deref().map_or(true, |needle| matches_search(item, needle)))
      .skip(query.skip.unwrap_or(0) as usize)
      .take(query.limit.map_or(usize::MAX, |limit| limit as usize))
      .cloned()
      .collect();
    let total = contents.len() as u64;
    Ok(ContentList { contents, total: Some(total), page: Some(1), size: query.limit })
  }

  async fn get_stats(&self, _user_id: &str) -> Result<Stats> {
    self.check_reads()?;
    Ok(Stats::from_items(&self.lock()))
  }

  async fn delete_content(&self, id: ContentId) -> Result<()> {
    if self.fail_deletes.load(Ordering::SeqCst) {
      return Err(StashError::Api { status: 500, message: "delete refused".into() });
    }
    let mut items = self.lock();
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
      return Err(StashError::NotFound);
    }
    Ok(())
  }

  async fn get_content(&self, id: ContentId) -> Result<ContentItem> {
    self.check_reads()?;
    self.lock().iter().find(|item| item.id == id).cloned().ok_or(StashError::NotFound)
  }
}
