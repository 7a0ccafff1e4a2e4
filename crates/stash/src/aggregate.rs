//! Chart series and summary metrics.
//!
//! Everything here is a pure function of a snapshot's items and stats (and, for
//! recency, the evaluation instant). Nothing is cached, so derived figures cannot
//! drift from the snapshot they were computed from.
//!
//! Two sources feed these figures:
//! - Category figures come from the backend's [`Stats`].
//! - Platform figures are counted from the local items, because the backend does
//!   not report a platform breakdown. Platform percentages therefore divide local
//!   counts by the backend's `total_contents`; if the backend ever paginates the
//!   list, those percentages will undercount.

use chrono::Duration as TimeDelta;

use super::*;
use crate::{format::axis_label, store::CollectionSnapshot};

/// Length of the trailing window used by [`weekly_count`].
pub const WEEK: TimeDelta = TimeDelta::days(7);

/// One slice of a category chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryPoint {
  /// The category counted
  pub category: Category,
  /// Number of items in it
  pub value:    u64,
}

impl CategoryPoint {
  /// Series name, the category's wire identifier.
  pub fn name(&self) -> &'static str { self.category.id() }
}

/// One bar of the ranked category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPoint {
  /// The category counted
  pub category: Category,
  /// Short uppercase axis label
  pub label:    String,
  /// Number of items in it
  pub value:    u64,
}

/// Items and share of the collection on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformShare {
  /// The platform counted
  pub platform: Platform,
  /// Number of local items on it
  pub count:    u64,
  /// `count` as a rounded percentage of the backend total
  pub percent:  u64,
}

/// Headline numbers for a dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  /// Authoritative collection size from the backend
  pub total:      u64,
  /// Items saved in the trailing seven days
  pub weekly:     usize,
  /// Categories with at least one item
  pub categories: usize,
  /// Distinct platforms among local items
  pub platforms:  usize,
}

/// Every derived figure for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
  /// Headline numbers
  pub summary:         Summary,
  /// Pie series: non-empty categories in enumeration order
  pub category_series: Vec<CategoryPoint>,
  /// Bar series: non-empty categories, largest first
  pub ranked_series:   Vec<RankedPoint>,
  /// Tiles: every category, including empty ones
  pub category_tiles:  Vec<CategoryPoint>,
  /// Platform breakdown with percentages
  pub platforms:       Vec<PlatformShare>,
}

impl Dashboard {
  /// Derives every figure from `snapshot`, measuring recency from `now`.
  pub fn compute(snapshot: &CollectionSnapshot, now: DateTime<Utc>) -> Self {
    Self::from_parts(&snapshot.items, &snapshot.stats, now)
  }

  /// Derives every figure from raw items and stats.
  pub fn from_parts(items: &[ContentItem], stats: &Stats, now: DateTime<Utc>) -> Self {
    Self {
      summary:         summary(items, stats, now),
      category_series: category_series(stats),
      ranked_series:   ranked_category_series(stats),
      category_tiles:  category_tiles(stats),
      platforms:       platform_breakdown(items, stats),
    }
  }
}

/// Categories with a non-zero count, in enumeration order.
pub fn category_series(stats: &Stats) -> Vec<CategoryPoint> {
  Category::ALL
    .into_iter()
    .map(|category| CategoryPoint { category, value: stats.count(category) })
    .filter(|point| point.value > 0)
    .collect()
}

/// Categories with a non-zero count, largest first.
///
/// Equal counts keep enumeration order.
pub fn ranked_category_series(stats: &Stats) -> Vec<RankedPoint> {
  let mut series = category_series(stats);
  // `sort_by` is stable, which is what keeps ties in enumeration order.
  series.sort_by(|a, b| b.value.cmp(&a.value));
  series
    .into_iter()
    .map(|point| RankedPoint {
      category: point.category,
      label:    axis_label(point.name()),
      value:    point.value,
    })
    .collect()
}

/// Every category with its count, zeros included.
pub fn category_tiles(stats: &Stats) -> Vec<CategoryPoint> {
  Category::ALL
    .into_iter()
    .map(|category| CategoryPoint { category, value: stats.count(category) })
    .collect()
}

/// Local items per platform, only platforms that occur, in enumeration order.
pub fn platform_counts(items: &[ContentItem]) -> BTreeMap<Platform, u64> {
  let mut counts = BTreeMap::new();
  for item in items {
    *counts.entry(item.platform).or_insert(0) += 1;
  }
  counts
}

/// Number of items saved strictly after `now - 7 days`.
///
/// Items without a timestamp are not counted.
pub fn weekly_count(items: &[ContentItem], now: DateTime<Utc>) -> usize {
  let cutoff = now - WEEK;
  items.iter().filter(|item| item.created_at.is_some_and(|at| at > cutoff)).count()
}

/// `count` as a rounded percentage of `total`; zero when `total` is zero.
pub fn percentage(count: u64, total: u64) -> u64 {
  if total == 0 {
    return 0;
  }
  (count as f64 / total as f64 * 100.0).round() as u64
}

/// Platform counts with their share of the backend total.
pub fn platform_breakdown(items: &[ContentItem], stats: &Stats) -> Vec<PlatformShare> {
  platform_counts(items)
    .into_iter()
    .map(|(platform, count)| PlatformShare {
      platform,
      count,
      percent: percentage(count, stats.total_contents),
    })
    .collect()
}

/// Headline numbers for `items` and `stats`.
pub fn summary(items: &[ContentItem], stats: &Stats, now: DateTime<Utc>) -> Summary {
  Summary {
    total:      stats.total_contents,
    weekly:     weekly_count(items, now),
    categories: stats.category_counts.values().filter(|count| **count > 0).count(),
    platforms:  platform_counts(items).len(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn counts(pairs: &[(Category, u64)]) -> Stats {
    Stats {
      total_contents:  pairs.iter().map(|(_, count)| count).sum(),
      category_counts: pairs.iter().copied().collect(),
    }
  }

  #[test]
  fn test_series_omits_empty_categories() {
    let stats = counts(&[(Category::Travel, 2), (Category::Coding, 5), (Category::Design, 0)]);
    let series = category_series(&stats);
    assert_eq!(series, vec![
      CategoryPoint { category: Category::Coding, value: 5 },
      CategoryPoint { category: Category::Travel, value: 2 },
    ]);
    assert_eq!(category_tiles(&stats).len(), Category::ALL.len());
    assert_eq!(category_tiles(&stats)[4], CategoryPoint { category: Category::Design, value: 0 });
  }

  #[test]
  fn test_ranking_is_stable() {
    let stats = counts(&[(Category::Travel, 2), (Category::Food, 5), (Category::Coding, 5)]);
    let ranked = ranked_category_series(&stats);
    let order: Vec<_> = ranked.iter().map(|point| point.category).collect();
    assert_eq!(order, vec![Category::Coding, Category::Food, Category::Travel]);
    assert_eq!(ranked[0].label, "CODIN");
    assert_eq!(ranked[2].label, "TRAVE");
  }

  #[test]
  fn test_percentage() {
    assert_eq!(percentage(1, 2), 50);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(5, 0), 0);
    assert_eq!(percentage(0, 0), 0);
  }

  #[test]
  fn test_zero_total_gives_zero_percentages() {
    let items = vec![
      ContentItem::new(1, "a").with_platform(Platform::Youtube),
      ContentItem::new(2, "b").with_platform(Platform::Blog),
    ];
    let shares = platform_breakdown(&items, &Stats::default());
    assert_eq!(shares.len(), 2);
    assert!(shares.iter().all(|share| share.percent == 0));
  }

  #[test]
  fn test_weekly_window() {
    let now = Utc::now();
    let items = vec![
      ContentItem::new(1, "a").created(now - TimeDelta::days(6)),
      ContentItem::new(2, "b").created(now - TimeDelta::days(8)),
      ContentItem::new(3, "c").created(now - WEEK),
      ContentItem::new(4, "d"),
      ContentItem::new(5, "e").created(now),
    ];
    assert_eq!(weekly_count(&items, now), 2);
  }

  #[test]
  fn test_unknown_platform_counts_as_other() {
    let item: ContentItem =
      serde_json::from_str(r#"{"id": 1, "url": "u", "platform": "tiktok"}"#).unwrap();
    let counts = platform_counts(&[item, ContentItem::new(2, "v")]);
    assert_eq!(counts.get(&Platform::Other), Some(&2));
  }

  #[test]
  fn test_dashboard_end_to_end() {
    let now = Utc::now();
    let items = vec![
      ContentItem::new(1, "a")
        .with_category(Category::Coding)
        .with_platform(Platform::Youtube)
        .created(now),
      ContentItem::new(2, "b")
        .with_category(Category::Food)
        .with_platform(Platform::Instagram)
        .created(now - TimeDelta::days(10)),
    ];
    let stats = counts(&[(Category::Coding, 1), (Category::Food, 1)]);
    let dashboard = Dashboard::from_parts(&items, &stats, now);

    assert_eq!(dashboard.summary, Summary { total: 2, weekly: 1, categories: 2, platforms: 2 });
    let pie: Vec<_> =
      dashboard.category_series.iter().map(|point| (point.name(), point.value)).collect();
    assert_eq!(pie, vec![("coding", 1), ("food", 1)]);
    assert_eq!(dashboard.platforms, vec![
      PlatformShare { platform: Platform::Instagram, count: 1, percent: 50 },
      PlatformShare { platform: Platform::Youtube, count: 1, percent: 50 },
    ]);
  }
}
