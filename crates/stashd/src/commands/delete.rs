//! Module for deleting one item from the collection.

use super::*;

#[derive(Args, Clone)]
pub struct DeleteOptions {
  /// Content identifier, as printed by `list`
  pub id: ContentId,
}

/// Function for the [`Commands::Delete`] in the CLI.
///
/// The item only disappears from the collection once the backend confirms the
/// delete; a refused delete leaves everything as it was.
pub async fn delete<I: UserInteraction, G: Gateway>(
  interaction: &I,
  store: &CollectionStore<G>,
  options: DeleteOptions,
) -> Result<()> {
  let DeleteOptions { id } = options;

  // Best effort: the title makes the confirmation readable, but the delete itself
  // does not depend on a fresh snapshot.
  if let Err(e) = store.refresh().await {
    debug!("Could not refresh before deleting: {}", e);
  }
  let snapshot = store.snapshot();
  let question = match snapshot.get(id) {
    Some(item) => format!("Delete \"{}\"?", item.headline()),
    None => format!("Delete content {id}?"),
  };
  if !interaction.confirm(&question)? {
    interaction.reply(ResponseContent::Info("Nothing deleted"))?;
    return Ok(());
  }

  store.delete_item(id).await?;
  let remaining = store.snapshot().stats.total_contents;
  interaction.reply(ResponseContent::Success(&format!("Deleted {id}, {remaining} items left")))
}
