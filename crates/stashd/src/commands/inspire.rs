//! Module for the random inspiration picker.

use stash::sampler::{Sampler, SamplerConfig, SamplerState};

use super::*;

#[derive(Args, Clone)]
pub struct InspireOptions {
  /// How many times to roll
  #[arg(long, default_value_t = 1)]
  pub rolls: u32,

  /// Seed the picker for a reproducible sequence
  #[arg(long)]
  pub seed: Option<u64>,
}

impl Default for InspireOptions {
  fn default() -> Self { Self { rolls: 1, seed: None } }
}

/// Function for the [`Commands::Inspire`] in the CLI.
pub async fn inspire<I: UserInteraction, G: Gateway>(
  interaction: &I,
  store: &CollectionStore<G>,
  config: SamplerConfig,
  options: InspireOptions,
) -> Result<()> {
  store.refresh().await?;
  let snapshot = store.snapshot();

  let mut sampler = match options.seed {
    Some(seed) => Sampler::with_seed(config, seed),
    None => Sampler::new(config),
  };
  let mut updates = sampler.subscribe();

  for roll in 1..=options.rolls.max(1) {
    if !sampler.roll(&snapshot) {
      interaction.reply(ResponseContent::Info("Nothing saved yet. Save some links first!"))?;
      return Ok(());
    }
    trace!("Roll {} of {}", roll, options.rolls);

    // The sampler lives as long as this loop, so the channel cannot close mid-roll.
    while updates.changed().await.is_ok() {
      let state = updates.borrow_and_update().state.clone();
      match state {
        SamplerState::Rolling { candidate: Some(candidate), .. } =>
          interaction.reply(ResponseContent::Candidate(&candidate))?,
        SamplerState::Settled(pick) => {
          interaction.reply(ResponseContent::Item(&pick))?;
          break;
        },
        SamplerState::Rolling { candidate: None, .. } | SamplerState::Idle => {},
      }
    }
  }

  sampler.dismiss();
  Ok(())
}

#[cfg(test)]
mod tests {
  use stash::gateway::MemoryGateway;

  use super::*;
  use crate::commands::recorder::{store, Recorder};

  #[tokio::test(start_paused = true)]
  async fn test_inspire_settles_on_an_item() {
    let interaction = Recorder::new(true);
    inspire(&interaction, &store(), SamplerConfig::default(), InspireOptions::default()).await.unwrap();

    let replies = interaction.replies.borrow();
    // Seven candidates flash by, then the pick is shown in full
    assert_eq!(replies.len(), 8);
    assert!(replies[..7].iter().all(|reply| reply.starts_with(WORKING_PREFIX)));
    assert!(replies[7].contains("https://"));
  }

  #[tokio::test(start_paused = true)]
  async fn test_inspire_rolls_again() {
    let interaction = Recorder::new(true);
    let config = SamplerConfig { interval: Duration::from_millis(10), draws: 2 };
    let options = InspireOptions { rolls: 3, seed: Some(9) };
    inspire(&interaction, &store(), config, options).await.unwrap();

    let settled = interaction.replies.borrow().iter().filter(|reply| reply.contains("https://")).count();
    assert_eq!(settled, 3);
  }

  #[tokio::test(start_paused = true)]
  async fn test_inspire_on_empty_collection() {
    let interaction = Recorder::new(true);
    let store = CollectionStore::new(MemoryGateway::new(), "+15550100");
    inspire(&interaction, &store, SamplerConfig::default(), InspireOptions::default()).await.unwrap();
    assert!(interaction.output().contains("Save some links first"));
  }
}
