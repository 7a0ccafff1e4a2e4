use super::*;

mod dashboard;
mod inspiration;
mod sync;

#[test]
fn test_fixture_decodes_leniently() {
  let list = fixture_list();
  assert_eq!(list.contents.len(), 4);
  assert_eq!(list.total, Some(4));

  let unknown = &list.contents[3];
  assert_eq!(unknown.category, Category::Other);
  assert_eq!(unknown.platform, Platform::Other);
  assert!(unknown.tags.is_empty());
  assert!(unknown.created_at.is_none());
  assert_eq!(unknown.headline(), unknown.url);

  let naive = list.contents[1].created_at.unwrap();
  assert_eq!(naive.to_rfc3339(), "2024-03-08T18:30:00.123456+00:00");
}

#[test]
fn test_fixture_stats_match_items() {
  // The backend counts the same way `Stats::from_items` does, unknown categories included.
  assert_eq!(fixture_stats(), Stats::from_items(&fixture_list().contents));
}
