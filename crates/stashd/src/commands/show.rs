use super::*;

/// Function for the [`Commands::Show`] in the CLI.
pub async fn show<I: UserInteraction, G: Gateway>(
  interaction: &I,
  store: &CollectionStore<G>,
  id: ContentId,
) -> Result<()> {
  match store.gateway().get_content(id).await {
    Ok(item) => interaction.reply(ResponseContent::Item(&item)),
    Err(StashError::NotFound) => Err(StashdError::Usage(format!("No content with id {id}"))),
    Err(e) => Err(e.into()),
  }
}
