//! Module for the statistics view.

use super::*;

/// Function for the [`Commands::Stats`] in the CLI.
pub async fn stats<I: UserInteraction, G: Gateway>(interaction: &I, store: &CollectionStore<G>) -> Result<()> {
  store.refresh().await?;
  let dashboard = Dashboard::compute(&store.snapshot(), Utc::now());
  interaction.reply(ResponseContent::Dashboard(&dashboard))
}
