use chrono::Duration as TimeDelta;
use stash::{
  aggregate::{CategoryPoint, PlatformShare, Summary},
  store::CollectionSnapshot,
};

use super::*;

#[tokio::test]
async fn test_fixture_dashboard() -> TestResult<()> {
  let store = create_test_store().await;
  let snapshot = store.snapshot();
  let dashboard = Dashboard::compute(&snapshot, fixture_now());

  assert_eq!(dashboard.summary, Summary { total: 4, weekly: 2, categories: 3, platforms: 4 });

  assert_eq!(dashboard.category_series, vec![
    CategoryPoint { category: Category::Coding, value: 2 },
    CategoryPoint { category: Category::Food, value: 1 },
    CategoryPoint { category: Category::Other, value: 1 },
  ]);
  let labels: Vec<_> = dashboard.ranked_series.iter().map(|point| point.label.as_str()).collect();
  assert_eq!(labels, vec!["CODIN", "FOOD", "OTHER"]);
  assert_eq!(dashboard.category_tiles.len(), 10);

  assert_eq!(dashboard.platforms.len(), 4);
  assert!(dashboard.platforms.iter().all(|share| share.count == 1 && share.percent == 25));
  Ok(())
}

#[tokio::test]
async fn test_filters_over_synced_snapshot() -> TestResult<()> {
  let store = create_test_store().await;
  let snapshot = store.snapshot();
  let ids = |view: &ViewState| {
    visible_items(&snapshot.items, view).iter().map(|item| item.id).collect::<Vec<_>>()
  };

  assert_eq!(ids(&ViewState::all()), vec![14, 13, 12, 11]);
  assert_eq!(ids(&ViewState::by_category("coding")), vec![14, 12]);
  assert_eq!(ids(&ViewState::by_category("other")), vec![11]);
  assert_eq!(ids(&ViewState::search("RUST")), vec![14, 12]);
  assert_eq!(ids(&ViewState::search("baking")), vec![13]);
  assert_eq!(ids(&ViewState::search("starter")), vec![13]);
  assert!(ids(&ViewState::search("woodworking")).is_empty());
  Ok(())
}

#[test]
fn test_two_item_scenario() {
  let now = Utc::now();
  let items = vec![
    ContentItem::new(2, "https://youtube.com/watch?v=x")
      .with_category(Category::Coding)
      .with_platform(Platform::Youtube)
      .created(now - TimeDelta::hours(3)),
    ContentItem::new(1, "https://instagram.com/p/y")
      .with_category(Category::Food)
      .with_platform(Platform::Instagram)
      .created(now - TimeDelta::days(10)),
  ];
  let stats = Stats::from_items(&items);
  let snapshot = CollectionSnapshot::new(items, stats);
  let dashboard = Dashboard::compute(&snapshot, now);

  assert_eq!(dashboard.summary.weekly, 1);
  assert_eq!(dashboard.platforms, vec![
    PlatformShare { platform: Platform::Instagram, count: 1, percent: 50 },
    PlatformShare { platform: Platform::Youtube, count: 1, percent: 50 },
  ]);
  let pie: Vec<_> = dashboard.category_series.iter().map(|point| (point.name(), point.value)).collect();
  assert_eq!(pie, vec![("coding", 1), ("food", 1)]);
}

#[test]
fn test_empty_collection() {
  let dashboard = Dashboard::compute(&CollectionSnapshot::default(), Utc::now());
  assert_eq!(dashboard.summary, Summary::default());
  assert!(dashboard.category_series.is_empty());
  assert!(dashboard.ranked_series.is_empty());
  assert!(dashboard.platforms.is_empty());
  assert!(dashboard.category_tiles.iter().all(|tile| tile.value == 0));
}
