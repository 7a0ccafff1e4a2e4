//! The randomized inspiration picker.
//!
//! A [`Sampler`] moves through `Idle → Rolling → Settled`. A roll shows a quick
//! sequence of random candidates (one every [`SamplerConfig::interval`]) and
//! settles on the last of [`SamplerConfig::draws`] of them.
//!
//! The draw sequence runs as a background task. At most one such task exists per
//! sampler: rolling again, dismissing or dropping the sampler cancels the running
//! one before anything else happens. Each roll also carries a generation number,
//! and a draw is only published while its generation is current, so a cancelled
//! sequence can never overwrite the state of a newer one.
//!
//! Draws come from the items captured when the roll started. A snapshot that is
//! replaced mid-roll does not affect the roll in progress.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::{task::JoinHandle, time};

use super::*;
use crate::{config::Config, store::CollectionSnapshot};

/// Timing of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
  /// Delay before each draw
  pub interval: Duration,
  /// Draws per roll; the last one is the settled pick. Zero counts as one.
  pub draws:    u32,
}

impl Default for SamplerConfig {
  fn default() -> Self { Self { interval: Duration::from_millis(80), draws: 8 } }
}

impl From<&Config> for SamplerConfig {
  fn from(config: &Config) -> Self {
    Self { interval: config.draw_interval(), draws: config.draw_count.max(1) }
  }
}

/// Where the picker is in its cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SamplerState {
  /// Nothing shown
  #[default]
  Idle,
  /// Shuffling through candidates
  Rolling {
    /// Most recent draw, `None` until the first one lands
    candidate: Option<ContentItem>,
    /// Draws made so far in this roll
    draws:     u32,
  },
  /// A pick has been committed
  Settled(ContentItem),
}

impl SamplerState {
  /// The item currently on display, if any.
  pub fn current(&self) -> Option<&ContentItem> {
    match self {
      Self::Idle => None,
      Self::Rolling { candidate, .. } => candidate.as_ref(),
      Self::Settled(item) => Some(item),
    }
  }

  /// Whether a roll is in progress.
  pub fn is_rolling(&self) -> bool { matches!(self, Self::Rolling { .. }) }
}

/// Sampler state tagged with the roll that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerPhase {
  /// Incremented by every roll and dismissal
  pub generation: u64,
  /// Current state
  pub state:      SamplerState,
}

struct DrawTimer {
  token:  CancellationToken,
  handle: JoinHandle<()>,
}

/// Randomized picker over a collection snapshot.
///
/// Rolling spawns a task, so it must happen inside a Tokio runtime.
pub struct Sampler {
  config: SamplerConfig,
  phase:  Arc<watch::Sender<SamplerPhase>>,
  timer:  Option<DrawTimer>,
  rng:    StdRng,
}

impl Sampler {
  /// Creates an idle sampler seeded from the operating system.
  pub fn new(config: SamplerConfig) -> Self { Self::with_rng(config, StdRng::from_entropy()) }

  /// Creates an idle sampler with a fixed seed, for reproducible picks.
  pub fn with_seed(config: SamplerConfig, seed: u64) -> Self {
    Self::with_rng(config, StdRng::seed_from_u64(seed))
  }

  fn with_rng(mut config: SamplerConfig, rng: StdRng) -> Self {
    // A roll always ends in a settled pick, so it needs at least one draw.
    config.draws = config.draws.max(1);
    let (phase, _) = watch::channel(SamplerPhase::default());
    Self { config, phase: Arc::new(phase), timer: None, rng }
  }

  /// The current state.
  pub fn state(&self) -> SamplerState { self.phase.borrow().state.clone() }

  /// The current state with its generation.
  pub fn phase(&self) -> SamplerPhase { self.phase.borrow().clone() }

  /// A receiver notified on every state change.
  pub fn subscribe(&self) -> watch::Receiver<SamplerPhase> { self.phase.subscribe() }

  /// Whether a draw sequence is still running.
  pub fn has_active_timer(&self) -> bool {
    self.timer.as_ref().is_some_and(|timer| !timer.handle.is_finished())
  }

  /// Starts a new roll over the items of `snapshot`.
  ///
  /// Any roll in progress is cancelled first. Returns `false`, leaving the state
  /// untouched, when the snapshot holds no items.
  pub fn roll(&mut self, snapshot: &CollectionSnapshot) -> bool {
    if snapshot.items.is_empty() {
      debug!("Nothing to roll over");
      return false;
    }
    self.cancel_timer();

    let mut generation = 0;
    self.phase.send_modify(|phase| {
      phase.generation += 1;
      phase.state = SamplerState::Rolling { candidate: None, draws: 0 };
      generation = phase.generation;
    });

    let token = CancellationToken::new();
    let handle = tokio::spawn(draw_sequence(
      Arc::clone(&snapshot.items),
      self.config,
      generation,
      Arc::clone(&self.phase),
      StdRng::seed_from_u64(self.rng.gen()),
      token.clone(),
    ));
    self.timer = Some(DrawTimer { token, handle });
    debug!("Roll #{} over {} items", generation, snapshot.items.len());
    true
  }

  /// Abandons any roll and clears the pick.
  pub fn dismiss(&mut self) {
    self.cancel_timer();
    self.phase.send_modify(|phase| {
      phase.generation += 1;
      phase.state = SamplerState::Idle;
    });
  }

  fn cancel_timer(&mut self) {
    if let Some(timer) = self.timer.take() {
      timer.token.cancel();
      trace!("Cancelled draw sequence");
    }
  }
}

impl Drop for Sampler {
  fn drop(&mut self) { self.cancel_timer(); }
}

async fn draw_sequence(
  items: Arc<[ContentItem]>,
  config: SamplerConfig,
  generation: u64,
  phase: Arc<watch::Sender<SamplerPhase>>,
  mut rng: StdRng,
  cancel: CancellationToken,
) {
  for draw in 1..=config.draws {
    tokio::select! {
      biased;
      _ = cancel.cancelled() => return,
      _ = time::sleep(config.interval) => {},
    }

    let candidate = items[rng.gen_range(0..items.len())].clone();
    let last = draw == config.draws;
    let published = phase.send_if_modified(|phase| {
      if phase.generation != generation {
        return false;
      }
      phase.state = if last {
        SamplerState::Settled(candidate)
      } else {
        SamplerState::Rolling { candidate: Some(candidate), draws: draw }
      };
      true
    });
    if !published {
      return;
    }
  }
  debug!("Roll #{} settled", generation);
}
