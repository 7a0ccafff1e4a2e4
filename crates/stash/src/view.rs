//! Category and free-text filtering of a snapshot.
//!
//! [`visible_items`] is a pure function of the items and the [`ViewState`]. It
//! never re-sorts, so the result is always a subsequence of the input in the
//! input's (newest-first) order. It is cheap enough to recompute on every render.
//!
//! # Examples
//!
//! ```
//! use stash::{
//!   content::{Category, ContentItem},
//!   view::{visible_items, ViewState},
//! };
//!
//! let items = vec![
//!   ContentItem::new(1, "https://a.example").with_title("Hello World"),
//!   ContentItem::new(2, "https://b.example").with_category(Category::Food),
//! ];
//!
//! assert_eq!(visible_items(&items, &ViewState::search("HELLO")).len(), 1);
//! assert_eq!(visible_items(&items, &ViewState::by_category("food"))[0].id, 2);
//! assert_eq!(visible_items(&items, &ViewState::all()).len(), 2);
//! ```

use super::*;

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Which filter the user has selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
  /// Show everything
  #[default]
  All,
  /// Show one category
  ByCategory,
  /// Show items matching the search term
  Search,
}

/// The user's current filter selection, independent of the data.
///
/// `active_category` is kept as the raw identifier the user picked so that an
/// unknown value simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
  /// Active filter
  pub mode:            ViewMode,
  /// Category identifier, or [`ALL_CATEGORIES`]
  pub active_category: String,
  /// Free-text search term
  pub search_term:     String,
}

impl Default for ViewState {
  fn default() -> Self {
    Self {
      mode:            ViewMode::All,
      active_category: ALL_CATEGORIES.to_string(),
      search_term:     String::new(),
    }
  }
}

impl ViewState {
  /// No filtering.
  pub fn all() -> Self { Self::default() }

  /// Only items in `category` (a wire identifier such as `"coding"`, or `"all"`).
  pub fn by_category(category: impl Into<String>) -> Self {
    Self { mode: ViewMode::ByCategory, active_category: category.into(), ..Self::default() }
  }

  /// Only items matching `term`.
  pub fn search(term: impl Into<String>) -> Self {
    Self { mode: ViewMode::Search, search_term: term.into(), ..Self::default() }
  }

  /// Switches to category mode, keeping the search term for later.
  pub fn select_category(&mut self, category: impl Into<String>) {
    self.mode = ViewMode::ByCategory;
    self.active_category = category.into();
  }

  /// Switches to search mode with `term`, keeping the category for later.
  pub fn set_search(&mut self, term: impl Into<String>) {
    self.mode = ViewMode::Search;
    self.search_term = term.into();
  }

  /// Back to the unfiltered view.
  pub fn reset(&mut self) { *self = Self::default(); }

  /// Whether this state narrows the item set at all.
  pub fn is_filtering(&self) -> bool {
    match self.mode {
      ViewMode::All => false,
      ViewMode::ByCategory => self.active_category != ALL_CATEGORIES,
      ViewMode::Search => !self.search_term.is_empty(),
    }
  }
}

/// Computes the items visible under `view`, preserving input order.
///
/// 1. Category mode with a concrete category keeps items whose category equals it.
/// 2. Search mode with a non-empty term keeps items where the lowercased term is a
///    substring of the lowercased title, description, AI summary or any tag.
/// 3. Anything else returns every item.
pub fn visible_items<'a>(items: &'a [ContentItem], view: &ViewState) -> Vec<&'a ContentItem> {
  match view.mode {
    ViewMode::ByCategory if view.active_category != ALL_CATEGORIES =>
      items.iter().filter(|item| item.category.id() == view.active_category).collect(),
    ViewMode::Search if !view.search_term.is_empty() => {
      let needle = view.search_term.to_lowercase();
      items.iter().filter(|item| matches_search(item, &needle)).collect()
    },
    _ => items.iter().collect(),
  }
}

/// Whether `item` contains the already-lowercased `needle` in any searchable field.
///
/// Absent fields never match.
pub fn matches_search(item: &ContentItem, needle: &str) -> bool {
  let contains = |text: &str| text.to_lowercase().contains(needle);
  [&item.title, &item.description, &item.ai_summary]
    .into_iter()
    .flatten()
    .any(|text| contains(text.as_str()))
    || item.tags.iter().any(|tag| contains(tag.as_str()))
}
