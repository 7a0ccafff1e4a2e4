//! Content items and aggregate counters as delivered by the backend.
//!
//! Decoding is deliberately forgiving. The backend may omit fields, send `null`,
//! or use category/platform names this crate does not know about:
//!
//! - Unknown or missing `category`/`platform` values decode to `Other`
//! - Missing or `null` `tags` decode to an empty list
//! - `created_at` accepts RFC 3339 as well as naive `YYYY-MM-DDTHH:MM:SS[.frac]`
//!   timestamps (read as UTC); anything else decodes to `None`
//! - Unknown keys in `category_counts` are folded into `other`
//!
//! # Examples
//!
//! ```
//! use stash::content::{Category, ContentItem, Platform};
//!
//! let item: ContentItem = serde_json::from_str(
//!   r#"{"id": 7, "url": "https://example.com", "category": "woodworking", "platform": null}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(item.category, Category::Other);
//! assert_eq!(item.platform, Platform::Other);
//! assert!(item.tags.is_empty());
//! assert!(item.created_at.is_none());
//! ```

use serde_json::Value;

use super::*;

/// Backend identifier of a content item.
pub type ContentId = i64;

/// One saved piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
  /// Identifier, stable across refreshes
  pub id:            ContentId,
  /// Link to the original content
  pub url:           String,
  /// Title scraped from the source, if any
  #[serde(default)]
  pub title:         Option<String>,
  /// Description scraped from the source, if any
  #[serde(default)]
  pub description:   Option<String>,
  /// Summary produced by the backend's model, if any
  #[serde(default)]
  pub ai_summary:    Option<String>,
  /// Topic bucket assigned by the backend
  #[serde(default)]
  pub category:      Category,
  /// Where the content was published
  #[serde(default)]
  pub platform:      Platform,
  /// Free-form tags
  #[serde(default, deserialize_with = "lenient_tags")]
  pub tags:          Vec<String>,
  /// When the item was saved
  #[serde(default, deserialize_with = "lenient_timestamp")]
  pub created_at:    Option<DateTime<Utc>>,
  /// Preview image, if any
  #[serde(default)]
  pub thumbnail_url: Option<String>,
}

impl ContentItem {
  /// Creates an item with only the required fields set.
  pub fn new(id: ContentId, url: impl Into<String>) -> Self {
    Self {
      id,
      url: url.into(),
      title: None,
      description: None,
      ai_summary: None,
      category: Category::Other,
      platform: Platform::Other,
      tags: Vec::new(),
      created_at: None,
      thumbnail_url: None,
    }
  }

  /// Sets the title.
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  /// Sets the description.
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Sets the AI summary.
  pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
    self.ai_summary = Some(summary.into());
    self
  }

  /// Sets the category.
  pub fn with_category(mut self, category: Category) -> Self {
    self.category = category;
    self
  }

  /// Sets the platform.
  pub fn with_platform(mut self, platform: Platform) -> Self {
    self.platform = platform;
    self
  }

  /// Appends a tag.
  pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
    self.tags.push(tag.into());
    self
  }

  /// Sets the creation timestamp.
  pub fn created(mut self, at: DateTime<Utc>) -> Self {
    self.created_at = Some(at);
    self
  }

  /// The title if present, otherwise the URL.
  pub fn headline(&self) -> &str { self.title.as_deref().unwrap_or(&self.url) }
}

/// Topic buckets, in their fixed enumeration order.
///
/// The declaration order is significant: it is the tie-break order for ranked
/// series and the iteration order of [`Stats::category_counts`].
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  /// Workouts, training and health
  Fitness,
  /// Programming and software
  Coding,
  /// Recipes and restaurants
  Food,
  /// Places and trips
  Travel,
  /// Visual and product design
  Design,
  /// Clothing and style
  Fashion,
  /// Companies, money and careers
  Business,
  /// Courses and explainers
  Education,
  /// Music, film and games
  Entertainment,
  /// Anything else, including unknown values
  #[default]
  Other,
}

impl Category {
  /// Every category in enumeration order.
  pub const ALL: [Category; 10] = [
    Category::Fitness,
    Category::Coding,
    Category::Food,
    Category::Travel,
    Category::Design,
    Category::Fashion,
    Category::Business,
    Category::Education,
    Category::Entertainment,
    Category::Other,
  ];

  /// The wire identifier, e.g. `"coding"`.
  pub fn id(self) -> &'static str {
    match self {
      Self::Fitness => "fitness",
      Self::Coding => "coding",
      Self::Food => "food",
      Self::Travel => "travel",
      Self::Design => "design",
      Self::Fashion => "fashion",
      Self::Business => "business",
      Self::Education => "education",
      Self::Entertainment => "entertainment",
      Self::Other => "other",
    }
  }

  /// Resolves a wire identifier, falling back to [`Category::Other`].
  pub fn from_id(id: &str) -> Self { id.parse().unwrap_or_default() }
}

impl Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.id()) }
}

impl FromStr for Category {
  type Err = StashError;

  fn from_str(s: &str) -> Result<Self> {
    let needle = s.trim();
    Self::ALL
      .into_iter()
      .find(|category| category.id().eq_ignore_ascii_case(needle))
      .ok_or_else(|| StashError::Config(format!("Unknown category \"{s}\"")))
  }
}

impl<'de> Deserialize<'de> for Category {
  fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
  where D: Deserializer<'de> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).map(Self::from_id).unwrap_or_default())
  }
}

/// Publishing platforms, in their fixed enumeration order.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  /// instagram.com posts and reels
  Instagram,
  /// youtube.com videos and shorts
  Youtube,
  /// twitter.com / x.com posts
  Twitter,
  /// facebook.com posts
  Facebook,
  /// Articles and blog posts
  Blog,
  /// Anything else, including unknown values
  #[default]
  Other,
}

impl Platform {
  /// Every platform in enumeration order.
  pub const ALL: [Platform; 6] = [
    Platform::Instagram,
    Platform::Youtube,
    Platform::Twitter,
    Platform::Facebook,
    Platform::Blog,
    Platform::Other,
  ];

  /// The wire identifier, e.g. `"youtube"`.
  pub fn id(self) -> &'static str {
    match self {
      Self::Instagram => "instagram",
      Self::Youtube => "youtube",
      Self::Twitter => "twitter",
      Self::Facebook => "facebook",
      Self::Blog => "blog",
      Self::Other => "other",
    }
  }

  /// Resolves a wire identifier, falling back to [`Platform::Other`].
  pub fn from_id(id: &str) -> Self {
    let needle = id.trim();
    Self::ALL
      .into_iter()
      .find(|platform| platform.id().eq_ignore_ascii_case(needle))
      .unwrap_or_default()
  }
}

impl Display for Platform {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.id()) }
}

impl<'de> Deserialize<'de> for Platform {
  fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
  where D: Deserializer<'de> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).map(Self::from_id).unwrap_or_default())
  }
}

/// Aggregate counters maintained by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  /// Authoritative size of the user's collection
  #[serde(default)]
  pub total_contents:  u64,
  /// Items per category; absent keys mean zero
  #[serde(default, deserialize_with = "lenient_counts")]
  pub category_counts: BTreeMap<Category, u64>,
}

impl Stats {
  /// The count for `category`, zero when absent.
  pub fn count(&self, category: Category) -> u64 {
    self.category_counts.get(&category).copied().unwrap_or(0)
  }

  /// Builds stats by counting `items`, the way the backend does.
  pub fn from_items(items: &[ContentItem]) -> Self {
    let mut category_counts = BTreeMap::new();
    for item in items {
      *category_counts.entry(item.category).or_insert(0) += 1;
    }
    Self { total_contents: items.len() as u64, category_counts }
  }
}

/// The backend's answer to a list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentList {
  /// Items, newest first
  #[serde(default)]
  pub contents: Vec<ContentItem>,
  /// Count reported by the backend, when it bothers
  #[serde(default)]
  pub total:    Option<u64>,
  /// One-based page number
  #[serde(default)]
  pub page:     Option<u64>,
  /// Page size used by the backend
  #[serde(default)]
  pub size:     Option<u64>,
}

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 and the naive ISO form the backend emits for timezone-less
/// columns, which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
    return Some(parsed.with_timezone(&Utc));
  }
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|naive| naive.and_utc())
}

fn lenient_tags<'de, D>(deserializer: D) -> core::result::Result<Vec<String>, D::Error>
where D: Deserializer<'de> {
  let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
  Ok(
    raw
      .unwrap_or_default()
      .into_iter()
      .filter_map(|tag| match tag {
        Value::String(tag) => Some(tag),
        Value::Null => None,
        other => Some(other.to_string()),
      })
      .collect(),
  )
}

fn lenient_timestamp<'de, D>(deserializer: D) -> core::result::Result<Option<DateTime<Utc>>, D::Error>
where D: Deserializer<'de> {
  let raw = Option::<Value>::deserialize(deserializer)?;
  let parsed = raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp);
  if parsed.is_none() && raw.as_ref().is_some_and(|value| !value.is_null()) {
    trace!("Unreadable created_at {:?}, treating as absent", raw);
  }
  Ok(parsed)
}

fn lenient_counts<'de, D>(deserializer: D) -> core::result::Result<BTreeMap<Category, u64>, D::Error>
where D: Deserializer<'de> {
  let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
  let mut counts = BTreeMap::new();
  for (key, value) in raw.unwrap_or_default() {
    let count = value.as_u64().unwrap_or(0);
    *counts.entry(Category::from_id(&key)).or_insert(0) += count;
  }
  Ok(counts)
}
