//! Module for keeping the statistics on screen while the collection refreshes.

use std::future::Future;

use stash::{format::time_ago_opt, store::CollectionSnapshot};

use super::*;

/// Function for the [`Commands::Watch`] in the CLI.
///
/// Syncs once, then refreshes every `period` and prints a status line whenever
/// the collection changes or a sync fails. Runs until `shutdown` resolves, then
/// stops the refresh schedule before returning.
pub async fn watch<I, G, F>(
  interaction: &I,
  store: Arc<CollectionStore<G>>,
  period: Duration,
  shutdown: F,
) -> Result<()>
where
  I: UserInteraction,
  G: Gateway + 'static,
  F: Future<Output = ()>,
{
  if let Err(e) = store.refresh().await {
    interaction.reply(ResponseContent::Warning(&format!("Initial sync failed: {e}")))?;
  }
  let mut updates = store.subscribe();
  let mut shown = updates.borrow_and_update().clone();
  let dashboard = Dashboard::compute(&shown, Utc::now());
  interaction.reply(ResponseContent::Dashboard(&dashboard))?;

  let schedule = store.start_polling(period);
  interaction.reply(ResponseContent::Info(&format!(
    "Refreshing every {}s, press Ctrl-C to stop",
    period.as_secs()
  )))?;

  tokio::pin!(shutdown);
  loop {
    tokio::select! {
      _ = &mut shutdown => break,
      changed = updates.changed() => {
        if changed.is_err() {
          break;
        }
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.loading || !is_news(&shown, &snapshot) {
          continue;
        }
        report(interaction, &snapshot)?;
        shown = snapshot;
      },
    }
  }

  schedule.shutdown().await;
  interaction.reply(ResponseContent::Info("Stopped watching"))
}

/// Whether `next` differs from `shown` in anything worth printing.
fn is_news(shown: &CollectionSnapshot, next: &CollectionSnapshot) -> bool {
  next.last_error != shown.last_error
    || next.stats != shown.stats
    || next.items.iter().map(|item| item.id).ne(shown.items.iter().map(|item| item.id))
}

fn report<I: UserInteraction>(interaction: &I, snapshot: &CollectionSnapshot) -> Result<()> {
  let now = Utc::now();
  if let Some(e) = &snapshot.last_error {
    let age = time_ago_opt(snapshot.last_synced_at, now);
    return interaction.reply(ResponseContent::Warning(&format!(
      "Sync failed ({e}), showing data from {age}"
    )));
  }
  let summary = Dashboard::compute(snapshot, now).summary;
  interaction.reply(ResponseContent::Info(&format!(
    "{} saved, {} this week (synced {})",
    summary.total,
    summary.weekly,
    now.format("%H:%M:%S")
  )))
}
