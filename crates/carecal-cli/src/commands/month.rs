//! Month heatmap command.

use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

use carecal_core::breakdown::format_percent;
use carecal_core::{compute_month_grid, Config, HeatLevel, MonthGrid};

use super::EventSource;

#[derive(Args, Debug)]
pub struct MonthArgs {
    /// Year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12 (defaults to the current month)
    #[arg(long)]
    pub month: Option<u32>,
    #[command(flatten)]
    pub source: EventSource,
    /// Print the grid as JSON
    #[arg(long)]
    pub json: bool,
    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

pub fn run(args: MonthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = args.source.load(&config)?;

    let today = Local::now().date_naive();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());

    let grid = compute_month_grid(year, month, store.events())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        let color = config.display.color && !args.no_color;
        print!("{}", render_grid(&grid, color));
    }
    Ok(())
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render the grid as a seven-column ASCII calendar with a legend.
pub fn render_grid(grid: &MonthGrid, color: bool) -> String {
    let mut output = String::new();

    let title = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", grid.year, grid.month));
    output.push_str(&format!("\n{title}\n"));
    output.push_str(&"=".repeat(WEEKDAYS.len() * 7));
    output.push('\n');

    for name in WEEKDAYS {
        output.push_str(&format!("{name:<7}"));
    }
    output.push('\n');

    for week in grid.weeks() {
        for cell in week {
            match cell.score {
                Some(score) => {
                    let level = HeatLevel::from_score(score);
                    let text = format!("{:>2}{}{:>3}", cell.day(), level.glyph(), score);
                    if color {
                        let code = level.ansi_color();
                        output.push_str(&format!("\x1b[38;5;{code}m{text}\x1b[0m "));
                    } else {
                        output.push_str(&text);
                        output.push(' ');
                    }
                }
                None => output.push_str(&format!("{:>2}     ", "")),
            }
        }
        output.push('\n');
    }

    output.push_str(&"=".repeat(WEEKDAYS.len() * 7));
    output.push('\n');
    output.push_str("Legend:");
    for level in HeatLevel::ALL {
        let (lo, hi) = level.range();
        if lo == hi {
            output.push_str(&format!(" {} ({lo})", level.glyph()));
        } else {
            output.push_str(&format!(" {} ({lo}-{hi})", level.glyph()));
        }
    }
    output.push('\n');

    let scored: Vec<u8> = grid.current_month_cells().filter_map(|c| c.score).collect();
    if !scored.is_empty() {
        let average = scored.iter().map(|s| f64::from(*s)).sum::<f64>() / scored.len() as f64;
        let active = scored.iter().filter(|s| **s > 0).count();
        output.push_str(&format!(
            "Peak {} | Average {} | {active}/{} days with influence\n",
            format_percent(f64::from(grid.peak_score())),
            format_percent(average),
            scored.len()
        ));
    }

    output
}
