//! Module for listing the collection through a [`ViewState`].

use stash::view::{visible_items, ViewState};

use super::*;

#[derive(Args, Clone, Default)]
pub struct ListOptions {
  /// Only show this category (fitness, coding, food, travel, design, fashion, business,
  /// education, entertainment, other)
  #[arg(long, short = 'C', conflicts_with = "search")]
  pub category: Option<String>,

  /// Only show items whose title, description, summary or tags contain this text
  #[arg(long, short)]
  pub search: Option<String>,
}

impl ListOptions {
  fn view(&self) -> ViewState {
    match (&self.category, &self.search) {
      (Some(category), _) => ViewState::by_category(category.trim().to_lowercase()),
      (None, Some(term)) => ViewState::search(term.as_str()),
      (None, None) => ViewState::all(),
    }
  }
}

/// Function for the [`Commands::List`] in the CLI.
pub async fn list<I: UserInteraction, G: Gateway>(
  interaction: &I,
  store: &CollectionStore<G>,
  options: ListOptions,
) -> Result<()> {
  store.refresh().await?;
  let snapshot = store.snapshot();
  let view = options.view();
  debug!("Listing with {:?}", view);

  let visible = visible_items(&snapshot.items, &view);
  interaction.reply(ResponseContent::Items(&visible))
}
