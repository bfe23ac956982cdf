//! Display lookup tables.
//!
//! Category styling and heat levels live here so the scoring engine never
//! has to know about colors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::event::Category;

/// Styling for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub category: Category,
    pub label: String,
    /// Hex color, `#rrggbb`.
    pub color: String,
}

impl CategoryStyle {
    /// `[Label]`, wrapped in a 24-bit ANSI color when `color` is set and the
    /// hex color parses.
    pub fn tag(&self, color: bool) -> String {
        let tag = format!("[{}]", self.label);
        match parse_hex_color(&self.color) {
            Some((r, g, b)) if color => format!("\x1b[38;2;{r};{g};{b}m{tag}\x1b[0m"),
            _ => tag,
        }
    }
}

const DEFAULT_STYLES: [(Category, &str, &str); 4] = [
    (Category::Therapy, "Therapy", "#8b5cf6"),
    (Category::Exercise, "Exercise", "#10b981"),
    (Category::QualityTime, "Quality time", "#f59e0b"),
    (Category::Other, "Other", "#6b7280"),
];

/// Category lookup table with optional color overrides.
#[derive(Debug, Clone)]
pub struct Palette {
    styles: HashMap<Category, CategoryStyle>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        let styles = DEFAULT_STYLES
            .iter()
            .map(|(category, label, color)| {
                (
                    *category,
                    CategoryStyle {
                        category: *category,
                        label: label.to_string(),
                        color: color.to_string(),
                    },
                )
            })
            .collect();
        Self { styles }
    }

    /// Build a palette, replacing colors for the category keys present in
    /// `overrides`. Keys that match no category and malformed colors are
    /// ignored.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut palette = Self::new();
        for category in Category::ALL {
            let Some(color) = overrides.get(category.key()) else {
                continue;
            };
            if parse_hex_color(color).is_none() {
                tracing::warn!(
                    category = category.key(),
                    color = %color,
                    "ignoring malformed color override"
                );
                continue;
            }
            if let Some(style) = palette.styles.get_mut(&category) {
                style.color = color.clone();
            }
        }
        palette
    }

    pub fn style(&self, category: Category) -> &CategoryStyle {
        // Every category is inserted by `new`.
        &self.styles[&category]
    }

    /// Styles in display order.
    pub fn styles(&self) -> Vec<&CategoryStyle> {
        Category::ALL.iter().map(|c| self.style(*c)).collect()
    }
}

/// Parse `#rrggbb` into RGB components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Intensity bucket for a display score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    None,
    Low,
    Medium,
    High,
    Peak,
}

impl HeatLevel {
    pub const ALL: [HeatLevel; 5] = [
        HeatLevel::None,
        HeatLevel::Low,
        HeatLevel::Medium,
        HeatLevel::High,
        HeatLevel::Peak,
    ];

    pub fn from_score(score: u8) -> Self {
        match score {
            0 => HeatLevel::None,
            1..=25 => HeatLevel::Low,
            26..=50 => HeatLevel::Medium,
            51..=75 => HeatLevel::High,
            _ => HeatLevel::Peak,
        }
    }

    /// Character for ASCII heatmaps.
    pub fn glyph(&self) -> char {
        match self {
            HeatLevel::None => '·',
            HeatLevel::Low => '░',
            HeatLevel::Medium => '▒',
            HeatLevel::High => '▓',
            HeatLevel::Peak => '█',
        }
    }

    /// Inclusive score range, for legends.
    pub fn range(&self) -> (u8, u8) {
        match self {
            HeatLevel::None => (0, 0),
            HeatLevel::Low => (1, 25),
            HeatLevel::Medium => (26, 50),
            HeatLevel::High => (51, 75),
            HeatLevel::Peak => (76, 100),
        }
    }

    /// 256-color ANSI code, green ramp.
    pub fn ansi_color(&self) -> u8 {
        match self {
            HeatLevel::None => 240,
            HeatLevel::Low => 22,
            HeatLevel::Medium => 28,
            HeatLevel::High => 34,
            HeatLevel::Peak => 46,
        }
    }
}
