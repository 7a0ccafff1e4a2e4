use super::*;

pub mod delete;
pub mod init;
pub mod inspire;
pub mod list;
pub mod show;
pub mod stats;
pub mod watch;

pub use delete::{delete, DeleteOptions};
pub use init::{init, InitOptions};
pub use inspire::{inspire, InspireOptions};
pub use list::{list, ListOptions};
pub use show::show;
pub use stats::stats;
pub use watch::watch;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration file with the backend URL and user id
  Init(InitOptions),

  /// List saved content, optionally narrowed by category or search text
  List(ListOptions),

  /// Show one item in full
  Show {
    /// Content identifier, as printed by `list`
    id: ContentId,
  },

  /// Show collection statistics
  Stats,

  /// Delete one item after confirmation
  Delete(DeleteOptions),

  /// Pick something random from the collection
  Inspire(InspireOptions),

  /// Keep the statistics on screen, refreshing on a fixed schedule until Ctrl-C
  Watch,
}

/// Interaction that records what commands say, for tests.
#[cfg(test)]
pub(crate) mod recorder {
  use std::cell::RefCell;

  use stash::gateway::MemoryGateway;

  use super::*;

  pub struct Recorder {
    pub answer:  bool,
    pub replies: RefCell<Vec<String>>,
  }

  impl Recorder {
    pub fn new(answer: bool) -> Self { Self { answer, replies: RefCell::new(Vec::new()) } }

    pub fn output(&self) -> String { self.replies.borrow().join("\n") }
  }

  impl UserInteraction for Recorder {
    fn confirm(&self, _message: &str) -> Result<bool> { Ok(self.answer) }

    fn prompt(&self, _message: &str) -> Result<String> { Ok(String::new()) }

    fn reply(&self, content: ResponseContent) -> Result<()> {
      let text = render(&content, Utc::now());
      self.replies.borrow_mut().push(console::strip_ansi_codes(&text).to_string());
      Ok(())
    }
  }

  pub fn store() -> Arc<CollectionStore<MemoryGateway>> {
    let gateway = MemoryGateway::with_items(vec![
      ContentItem::new(3, "https://youtube.com/watch?v=1")
        .with_title("Borrow checker deep dive")
        .with_category(Category::Coding)
        .with_platform(Platform::Youtube),
      ContentItem::new(2, "https://instagram.com/p/2")
        .with_title("Ramen at home")
        .with_tag("noodles")
        .with_category(Category::Food)
        .with_platform(Platform::Instagram),
      ContentItem::new(1, "https://blog.example/3")
        .with_title("Pairing on async code")
        .with_category(Category::Coding)
        .with_platform(Platform::Blog),
    ]);
    Arc::new(CollectionStore::new(gateway, "+15550100"))
  }
}
