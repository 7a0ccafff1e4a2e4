use super::*;

/// Deleting content goes through the backend and shows up on the next snapshot
mod deletion {
  use super::*;

  #[tokio::test]
  async fn test_delete_removes_item_after_refresh() -> TestResult<()> {
    let store = create_test_store().await;
    let mut updates = store.subscribe();
    updates.borrow_and_update();

    store.delete_item(13).await?;

    assert!(updates.has_changed()?);
    let snapshot = store.snapshot();
    assert!(snapshot.get(13).is_none());
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.stats.total_contents, 3);
    assert_eq!(snapshot.stats.count(Category::Food), 0);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_failed_delete_leaves_collection_alone() -> TestResult<()> {
    let store = create_test_store().await;
    store.gateway().set_fail_deletes(true);
    let before = store.snapshot();

    let result = store.delete_item(13).await;
    assert!(matches!(result, Err(StashError::Api { status: 500, .. })));
    assert!(logs_contain("Deleting content 13 failed"));

    let after = store.snapshot();
    assert_eq!(after.items.len(), 4);
    assert_eq!(after.stats.total_contents, 4);
    assert_eq!(after, before);
    assert_eq!(store.gateway().len(), 4);
    Ok(())
  }

  #[tokio::test]
  async fn test_delete_unknown_item() -> TestResult<()> {
    let store = create_test_store().await;
    assert!(matches!(store.delete_item(999).await, Err(StashError::NotFound)));
    assert_eq!(store.snapshot().items.len(), 4);
    Ok(())
  }

  #[tokio::test]
  async fn test_delete_survives_failed_follow_up_refresh() -> TestResult<()> {
    let store = create_test_store().await;
    store.gateway().set_fail_reads(true);

    store.delete_item(14).await?;

    // The backend dropped the item but the snapshot could not be refreshed yet
    assert_eq!(store.gateway().len(), 3);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 4);
    assert!(snapshot.last_error.is_some());

    store.gateway().set_fail_reads(false);
    store.refresh().await?;
    assert!(store.snapshot().get(14).is_none());
    Ok(())
  }
}

/// Refresh failures are absorbed at the store boundary
mod failures {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_failed_refresh_keeps_last_snapshot() -> TestResult<()> {
    let store = create_test_store().await;
    let synced_at = store.snapshot().last_synced_at;
    store.gateway().set_fail_reads(true);

    let err = store.refresh().await.unwrap_err();
    assert!(err.is_transient());
    assert!(logs_contain("failed"));

    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 4);
    assert_eq!(snapshot.last_synced_at, synced_at);
    assert!(!snapshot.loading);
    assert!(snapshot.last_error.is_some());

    // Derived views keep working off the stale snapshot
    let dashboard = Dashboard::compute(&snapshot, fixture_now());
    assert_eq!(dashboard.summary.total, 4);
    Ok(())
  }

  #[tokio::test]
  async fn test_first_refresh_failure_leaves_empty_snapshot() -> TestResult<()> {
    let gateway = MemoryGateway::with_items(fixture_list().contents);
    gateway.set_fail_reads(true);
    let store = CollectionStore::new(gateway, "+15550100");

    assert!(store.refresh().await.is_err());
    let snapshot = store.snapshot();
    assert!(snapshot.is_empty());
    assert!(snapshot.last_synced_at.is_none());
    assert!(visible_items(&snapshot.items, &ViewState::search("rust")).is_empty());
    Ok(())
  }
}

/// The fixed-interval refresh schedule
mod polling {
  use super::*;

  const PERIOD: Duration = Duration::from_secs(15);

  #[tokio::test(start_paused = true)]
  async fn test_new_content_appears_on_next_tick() -> TestResult<()> {
    let store = create_test_store().await;
    let schedule = store.start_polling(PERIOD);

    store.gateway().insert(ContentItem::new(15, "https://blog.example/post").with_platform(Platform::Blog));
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.snapshot().items.len(), 4);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 5);
    assert_eq!(snapshot.items[0].id, 15);

    schedule.shutdown().await;
    Ok(())
  }

  #[tokio::test(start_paused = true)]
  async fn test_polling_retries_after_failure() -> TestResult<()> {
    let store = create_test_store().await;
    let _schedule = store.start_polling(PERIOD);

    store.gateway().set_fail_reads(true);
    tokio::time::sleep(Duration::from_secs(16)).await;
    assert!(store.snapshot().last_error.is_some());

    store.gateway().set_fail_reads(false);
    tokio::time::sleep(PERIOD).await;
    assert!(store.snapshot().last_error.is_none());
    assert_eq!(store.gateway().list_calls(), 3);
    Ok(())
  }

  #[tokio::test(start_paused = true)]
  async fn test_teardown_stops_refreshing() -> TestResult<()> {
    let store = create_test_store().await;
    let mut schedule = store.start_polling(PERIOD);
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(store.gateway().list_calls(), 3);

    schedule.stop();
    schedule.stop();
    tokio::time::sleep(PERIOD * 10).await;
    assert_eq!(store.gateway().list_calls(), 3);

    // Dropping a live schedule stops it as well
    let schedule = store.start_polling(PERIOD);
    drop(schedule);
    tokio::time::sleep(PERIOD * 10).await;
    assert_eq!(store.gateway().list_calls(), 3);
    Ok(())
  }
}
