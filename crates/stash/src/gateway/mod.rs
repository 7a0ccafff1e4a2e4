//! The remote content backend.
//!
//! The backend owns ingestion, categorization and persistence; this crate only
//! consumes a small request/response surface:
//!
//! - list a user's content
//! - fetch a user's aggregate statistics
//! - delete one item
//! - fetch one item
//!
//! [`Gateway`] is that contract. [`HttpGateway`] speaks it over HTTP/JSON and
//! [`MemoryGateway`] keeps everything in process, which is what the tests and
//! offline demos use.
//!
//! Every operation returns a [`Result`]; callers decide what a failure means.

use super::*;

mod http;
mod memory;

pub use self::{http::HttpGateway, memory::MemoryGateway};

/// Optional server-side narrowing for [`Gateway::list_content`].
///
/// The collection store always lists with [`ListQuery::default`] and does its
/// own filtering locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
  /// Only items in this category
  pub category: Option<Category>,
  /// Only items matching this search text
  pub search:   Option<String>,
  /// Number of items to skip
  pub skip:     Option<u64>,
  /// Maximum number of items to return
  pub limit:    Option<u64>,
}

impl ListQuery {
  /// Restricts the listing to one category.
  pub fn category(mut self, category: Category) -> Self {
    self.category = Some(category);
    self
  }

  /// Restricts the listing to items matching `term`.
  pub fn search(mut self, term: impl Into<String>) -> Self {
    self.search = Some(term.into());
    self
  }

  /// Sets the page window.
  pub fn page(mut self, skip: u64, limit: u64) -> Self {
    self.skip = Some(skip);
    self.limit = Some(limit);
    self
  }
}

/// Request/response contract of the content backend.
#[async_trait]
pub trait Gateway: Send + Sync {
  /// Lists the user's content, newest first.
  async fn list_content(&self, user_id: &str, query: &ListQuery) -> Result<ContentList>;

  /// Fetches the user's aggregate statistics.
  async fn get_stats(&self, user_id: &str) -> Result<Stats>;

  /// Deletes one item.
  async fn delete_content(&self, id: ContentId) -> Result<()>;

  /// Fetches one item.
  async fn get_content(&self, id: ContentId) -> Result<ContentItem>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
  async fn list_content(&self, user_id: &str, query: &ListQuery) -> Result<ContentList> {
    (**self).list_content(user_id, query).await
  }

  async fn get_stats(&self, user_id: &str) -> Result<Stats> { (**self).get_stats(user_id).await }

  async fn delete_content(&self, id: ContentId) -> Result<()> { (**self).delete_content(id).await }

  async fn get_content(&self, id: ContentId) -> Result<ContentItem> {
    (**self).get_content(id).await
  }
}
