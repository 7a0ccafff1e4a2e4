//! Rendering of command output and terminal prompts.

use console::{style, Color, Style, Term};
use dialoguer::{Confirm, Input};
use stash::{
  aggregate::Dashboard,
  display::pie_color,
  format::{time_ago_opt, truncate},
};

use super::*;

pub static INFO_PREFIX: &str = "ℹ ";
pub static WORKING_PREFIX: &str = "» ";
pub static SUCCESS_PREFIX: &str = "✓ ";
pub static ERROR_PREFIX: &str = "✗ ";
pub static WARNING_PREFIX: &str = "! ";
pub static PROMPT_PREFIX: &str = "❯ ";
pub static ITEM_PREFIX: &str = "├─";
pub static LAST_ITEM_PREFIX: &str = "└─";
pub static CONTINUE_PREFIX: &str = "│  ";
pub static BULLET: &str = "•";

/// Width of the widest bar in a chart.
const BAR_WIDTH: usize = 24;
/// Longest headline shown in a list row.
const HEADLINE_LEN: usize = 56;

/// Something a command wants to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Full detail of one item
  Item(&'a ContentItem),
  /// One row per item, in the given order
  Items(&'a [&'a ContentItem]),
  /// An inspiration candidate flashing past
  Candidate(&'a ContentItem),
  /// Charts and headline numbers
  Dashboard(&'a Dashboard),
  Success(&'a str),
  Error(StashdError),
  Info(&'a str),
  Warning(&'a str),
}

/// How commands talk to whoever is running them.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for free text; an empty answer means "keep the default".
  fn prompt(&self, message: &str) -> Result<String>;
  /// Shows `content`.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{}", style(PROMPT_PREFIX).cyan(), message))
        .default(false)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(String::new());
    }
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{}{}", style(PROMPT_PREFIX).cyan(), message))
        .allow_empty(true)
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Error(_) => eprintln!("{}", render(&content, Utc::now())),
      ResponseContent::Candidate(_) => {
        let term = Term::stdout();
        if term.is_term() {
          term.clear_line()?;
          term.write_str(&render(&content, Utc::now()))?;
        } else {
          term.write_line(&render(&content, Utc::now()))?;
        }
      },
      _ => println!("{}", render(&content, Utc::now())),
    }
    Ok(())
  }
}

/// Formats `content` for the terminal, measuring ages from `now`.
pub fn render(content: &ResponseContent, now: DateTime<Utc>) -> String {
  match content {
    ResponseContent::Item(item) => render_item(item, now),
    ResponseContent::Items(items) => render_items(items, now),
    ResponseContent::Candidate(item) => {
      let info = item.category.info();
      format!(
        "{}{} {}",
        style(WORKING_PREFIX).yellow(),
        style(info.icon).fg(accent(info.color)),
        truncate(item.headline(), HEADLINE_LEN)
      )
    },
    ResponseContent::Dashboard(dashboard) => render_dashboard(dashboard),
    ResponseContent::Success(message) => format!("{}{}", style(SUCCESS_PREFIX).green(), message),
    ResponseContent::Error(e) => format!("{}{}", style(ERROR_PREFIX).red(), e),
    ResponseContent::Info(message) => format!("{}{}", style(INFO_PREFIX).blue(), message),
    ResponseContent::Warning(message) => format!("{}{}", style(WARNING_PREFIX).yellow(), message),
  }
}

fn render_item(item: &ContentItem, now: DateTime<Utc>) -> String {
  let category = item.category.info();
  let platform = item.platform.info();
  let mut lines = vec![
    format!(
      "{} {} {} {} {} {} {}",
      style(ITEM_PREFIX).dim(),
      style(category.icon).fg(accent(category.color)),
      style(category.label).fg(accent(category.color)).bold(),
      BULLET,
      style(platform.label).fg(accent(platform.color)),
      BULLET,
      style(time_ago_opt(item.created_at, now)).dim(),
    ),
    format!("{}{}", style(CONTINUE_PREFIX).dim(), style(item.headline()).bold()),
  ];
  for text in [&item.ai_summary, &item.description].into_iter().flatten() {
    lines.push(format!("{}{}", style(CONTINUE_PREFIX).dim(), text));
  }
  if !item.tags.is_empty() {
    let tags: Vec<String> = item.tags.iter().map(|tag| format!("#{tag}")).collect();
    lines.push(format!("{}{}", style(CONTINUE_PREFIX).dim(), style(tags.join(" ")).cyan()));
  }
  lines.push(format!("{} {}", style(LAST_ITEM_PREFIX).dim(), style(&item.url).underlined()));
  lines.join("\n")
}

fn render_items(items: &[&ContentItem], now: DateTime<Utc>) -> String {
  if items.is_empty() {
    return format!("{}No content matches", style(INFO_PREFIX).blue());
  }
  let mut lines: Vec<String> = items
    .iter()
    .enumerate()
    .map(|(i, item)| {
      let branch = if i + 1 == items.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
      let category = item.category.info();
      format!(
        "{} {:>5} {} {:<width$} {:<10} {}",
        style(branch).dim(),
        style(item.id).yellow(),
        style(category.icon).fg(accent(category.color)),
        truncate(item.headline(), HEADLINE_LEN),
        item.platform.info().label,
        style(time_ago_opt(item.created_at, now)).dim(),
        width = HEADLINE_LEN,
      )
    })
    .collect();
  lines.push(format!("{}{} items", style(INFO_PREFIX).blue(), items.len()));
  lines.join("\n")
}

fn render_dashboard(dashboard: &Dashboard) -> String {
  let summary = &dashboard.summary;
  let mut lines = vec![format!(
    "{}{} saved {} {} this week {} {} categories {} {} platforms",
    style(INFO_PREFIX).blue(),
    style(summary.total).bold(),
    BULLET,
    style(summary.weekly).bold(),
    BULLET,
    style(summary.categories).bold(),
    BULLET,
    style(summary.platforms).bold(),
  )];

  if !dashboard.category_series.is_empty() {
    let share: Vec<String> = dashboard
      .category_series
      .iter()
      .enumerate()
      .map(|(i, point)| format!("{} {}", style("●").fg(accent(pie_color(i))), point.name()))
      .collect();
    lines.push(String::new());
    lines.push(share.join("  "));
  }

  let widest = dashboard.ranked_series.first().map_or(0, |point| point.value);
  lines.push(String::new());
  lines.push(style("Top categories").bold().to_string());
  if dashboard.ranked_series.is_empty() {
    lines.push(format!("{} {}", style(LAST_ITEM_PREFIX).dim(), style("nothing saved yet").dim()));
  }
  for (i, point) in dashboard.ranked_series.iter().enumerate() {
    let branch = if i + 1 == dashboard.ranked_series.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
    let color = accent(point.category.info().color);
    lines.push(format!(
      "{} {:<5} {} {}",
      style(branch).dim(),
      point.label,
      Style::new().fg(color).apply_to(bar(point.value, widest)),
      point.value
    ));
  }

  lines.push(String::new());
  lines.push(style("Platforms").bold().to_string());
  if dashboard.platforms.is_empty() {
    lines.push(format!("{} {}", style(LAST_ITEM_PREFIX).dim(), style("nothing saved yet").dim()));
  }
  for (i, share) in dashboard.platforms.iter().enumerate() {
    let branch = if i + 1 == dashboard.platforms.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
    let info = share.platform.info();
    lines.push(format!(
      "{} {:<10} {:>4} {}",
      style(branch).dim(),
      style(info.label).fg(accent(info.color)),
      share.count,
      style(format!("({}%)", share.percent)).dim()
    ));
  }
  lines.join("\n")
}

/// A bar proportional to `value / widest`, at least one cell for non-zero values.
fn bar(value: u64, widest: u64) -> String {
  if widest == 0 || value == 0 {
    return String::new();
  }
  let cells = ((value as f64 / widest as f64) * BAR_WIDTH as f64).round().max(1.0) as usize;
  "█".repeat(cells)
}

/// Maps a `#rrggbb` accent onto the 256-colour palette.
fn accent(hex: &str) -> Color {
  let channel = |range: std::ops::Range<usize>| {
    hex.trim_start_matches('#').get(range).and_then(|digits| u8::from_str_radix(digits, 16).ok())
  };
  match (channel(0..2), channel(2..4), channel(4..6)) {
    (Some(r), Some(g), Some(b)) => {
      let level = |c: u8| (u16::from(c) * 5 / 255) as u8;
      Color::Color256(16 + 36 * level(r) + 6 * level(g) + level(b))
    },
    _ => Color::White,
  }
}
