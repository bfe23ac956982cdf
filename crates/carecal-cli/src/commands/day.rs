use chrono::NaiveDate;
use clap::Args;

use carecal_core::breakdown::describe;
use carecal_core::{compute_day_influence, Config};

use super::EventSource;

#[derive(Args, Debug)]
pub struct DayArgs {
    /// Date to explain (YYYY-MM-DD)
    pub date: NaiveDate,
    #[command(flatten)]
    pub source: EventSource,
    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
    /// Maximum reach contributions to list (defaults to display.breakdown_limit)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

pub fn run(args: DayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = args.source.load(&config)?;
    let influence = compute_day_influence(args.date, store.events());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&influence)?);
        return Ok(());
    }

    let limit = if config.display.show_breakdown {
        args.limit.unwrap_or(config.display.breakdown_limit)
    } else {
        args.limit.unwrap_or(0)
    };
    let color = config.display.color && !args.no_color;
    let palette = config.palette();
    for line in describe(&influence, limit, &palette, color) {
        println!("{line}");
    }
    Ok(())
}
