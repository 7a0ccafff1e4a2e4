//! Static display metadata for categories and platforms.
//!
//! These tables are read-only reference data shared by every consumer. Lookups
//! never fail: anything unrecognized resolves to the `other` entry.

use super::*;

/// Presentation data for one [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
  /// The category described
  pub category: Category,
  /// Human readable name
  pub label:    &'static str,
  /// Single glyph used in compact views
  pub icon:     &'static str,
  /// Accent colour as `#rrggbb`
  pub color:    &'static str,
}

/// Presentation data for one [`Platform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
  /// The platform described
  pub platform:   Platform,
  /// Human readable name
  pub label:      &'static str,
  /// Accent colour as `#rrggbb`
  pub color:      &'static str,
  /// Translucent background variant of `color`
  pub background: &'static str,
}

/// Category metadata, indexed by enumeration order.
pub static CATEGORIES: [CategoryInfo; 10] = [
  CategoryInfo { category: Category::Fitness, label: "Fitness", icon: "⚡", color: "#39ff14" },
  CategoryInfo { category: Category::Coding, label: "Coding", icon: "⌬", color: "#00f5ff" },
  CategoryInfo { category: Category::Food, label: "Food", icon: "◉", color: "#ff6b1a" },
  CategoryInfo { category: Category::Travel, label: "Travel", icon: "◎", color: "#f5e642" },
  CategoryInfo { category: Category::Design, label: "Design", icon: "◈", color: "#ff00cc" },
  CategoryInfo { category: Category::Fashion, label: "Fashion", icon: "◇", color: "#cc88ff" },
  CategoryInfo { category: Category::Business, label: "Business", icon: "▣", color: "#f5e642" },
  CategoryInfo { category: Category::Education, label: "Education", icon: "◬", color: "#00f5ff" },
  CategoryInfo {
    category: Category::Entertainment,
    label:    "Entertainment",
    icon:     "▶",
    color:    "#ff00cc",
  },
  CategoryInfo { category: Category::Other, label: "Other", icon: "◌", color: "#4a4a7a" },
];

/// Platform metadata, indexed by enumeration order.
pub static PLATFORMS: [PlatformInfo; 6] = [
  PlatformInfo {
    platform:   Platform::Instagram,
    label:      "Instagram",
    color:      "#e1306c",
    background: "#e1306c22",
  },
  PlatformInfo {
    platform:   Platform::Youtube,
    label:      "YouTube",
    color:      "#ff0000",
    background: "#ff000022",
  },
  PlatformInfo {
    platform:   Platform::Twitter,
    label:      "Twitter/X",
    color:      "#1da1f2",
    background: "#1da1f222",
  },
  PlatformInfo {
    platform:   Platform::Facebook,
    label:      "Facebook",
    color:      "#1877f2",
    background: "#1877f222",
  },
  PlatformInfo {
    platform:   Platform::Blog,
    label:      "Blog",
    color:      "#39ff14",
    background: "#39ff1422",
  },
  PlatformInfo {
    platform:   Platform::Other,
    label:      "Link",
    color:      "#4a4a7a",
    background: "#4a4a7a22",
  },
];

/// Colours cycled through by pie chart slices.
pub const PIE_COLORS: [&str; 8] =
  ["#00f5ff", "#ff00cc", "#39ff14", "#f5e642", "#ff6b1a", "#cc88ff", "#ff6b6b", "#1da1f2"];

impl Category {
  /// Display metadata for this category.
  pub fn info(self) -> &'static CategoryInfo { &CATEGORIES[self as usize] }
}

impl Platform {
  /// Display metadata for this platform.
  pub fn info(self) -> &'static PlatformInfo { &PLATFORMS[self as usize] }
}

/// Display metadata for a raw category identifier, `other` when unknown.
pub fn category_info(id: &str) -> &'static CategoryInfo { Category::from_id(id).info() }

/// Display metadata for a raw platform identifier, `other` when unknown.
pub fn platform_info(id: &str) -> &'static PlatformInfo { Platform::from_id(id).info() }

/// The colour of the `index`-th pie slice.
pub fn pie_color(index: usize) -> &'static str { PIE_COLORS[index % PIE_COLORS.len()] }
