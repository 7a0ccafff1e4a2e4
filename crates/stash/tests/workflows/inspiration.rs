use super::*;

const TICK: Duration = Duration::from_millis(80);

#[tokio::test(start_paused = true)]
async fn test_roll_over_synced_collection() -> TestResult<()> {
  let store = create_test_store().await;
  let mut sampler = Sampler::new(SamplerConfig::default());
  let mut updates = sampler.subscribe();

  assert!(sampler.roll(&store.snapshot()));
  let mut seen_rolling = 0;
  loop {
    updates.changed().await?;
    match updates.borrow_and_update().state.clone() {
      SamplerState::Rolling { candidate, draws } => {
        assert!(candidate.is_some() || draws == 0);
        seen_rolling += 1;
      },
      SamplerState::Settled(pick) => {
        assert!(store.snapshot().get(pick.id).is_some());
        break;
      },
      SamplerState::Idle => panic!("sampler went idle mid-roll"),
    }
  }
  // The blank start of the roll and seven candidates, then the settled eighth
  assert_eq!(seen_rolling, 8);
  assert!(!sampler.has_active_timer());
  Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_empty_collection_has_nothing_to_inspire() -> TestResult<()> {
  let store = CollectionStore::new(MemoryGateway::new(), "+15550100");
  store.refresh().await?;

  let mut sampler = Sampler::new(SamplerConfig::default());
  assert!(!sampler.roll(&store.snapshot()));
  tokio::time::sleep(TICK * 10).await;
  assert_eq!(sampler.state(), SamplerState::Idle);
  Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_roll_finishes_against_captured_items() -> TestResult<()> {
  let store = create_test_store().await;
  let mut sampler = Sampler::new(SamplerConfig::default());
  sampler.roll(&store.snapshot());

  tokio::time::sleep(TICK * 3).await;
  for id in [11, 12, 13, 14] {
    store.delete_item(id).await?;
  }
  assert!(store.snapshot().is_empty());

  tokio::time::sleep(TICK * 6).await;
  let SamplerState::Settled(pick) = sampler.state() else {
    panic!("expected a settled pick, got {:?}", sampler.state());
  };
  assert!([11, 12, 13, 14].contains(&pick.id));

  // A fresh roll sees the emptied collection
  assert!(!sampler.roll(&store.snapshot()));
  assert_eq!(sampler.state(), SamplerState::Settled(pick));
  Ok(())
}
