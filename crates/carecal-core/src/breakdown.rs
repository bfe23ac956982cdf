//! Text breakdown of a day's influence, as shown on hover or in the CLI.

use crate::influence::{display_score, DayInfluence};
use crate::palette::Palette;

/// Whole-percent label, e.g. `"83%"`.
pub fn format_percent(score: f64) -> String {
    format!("{:.0}%", score)
}

/// `"today"`, `"1 day ago"`, `"N days ago"`.
pub fn days_ago(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        n => format!("{n} days ago"),
    }
}

/// Lines describing `influence`, listing at most `limit` reach contributions.
///
/// Each entry is tagged with its category label from `palette`; `color`
/// turns on ANSI coloring of the tags.
pub fn describe(
    influence: &DayInfluence,
    limit: usize,
    palette: &Palette,
    color: bool,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: {} influence",
        influence.date.format("%a %Y-%m-%d"),
        format_percent(f64::from(display_score(influence.total_score)))
    )];

    if influence.is_empty() {
        lines.push("  No activities or lingering effects.".to_string());
        return lines;
    }

    if !influence.direct_events.is_empty() {
        lines.push(format!(
            "  Direct ({}):",
            format_percent(influence.direct_score)
        ));
        for event in &influence.direct_events {
            lines.push(format!(
                "    {} {} (impact {}) +{}",
                palette.style(event.category).tag(color),
                event.name,
                event.impact,
                format_percent(event.contributed_score)
            ));
        }
    }

    if !influence.reach_contributions.is_empty() {
        lines.push(format!("  Reach ({}):", format_percent(influence.reach_score)));
        for c in influence.reach_contributions.iter().take(limit) {
            lines.push(format!(
                "    {} {} from {} (impact {}) +{}",
                palette.style(c.category).tag(color),
                c.name,
                days_ago(c.days_elapsed),
                c.impact,
                format_percent(c.contributed_effect)
            ));
        }
        let hidden = influence.reach_contributions.len().saturating_sub(limit);
        if hidden > 0 {
            lines.push(format!("    ... and {hidden} more"));
        }
    }

    lines
}
