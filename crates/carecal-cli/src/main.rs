use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "carecal", version, about = "Self-care influence calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Month heatmap of influence scores
    Month(commands::month::MonthArgs),
    /// Influence breakdown for one day
    Day(commands::day::DayArgs),
    /// Convert a reach value and unit to days
    Reach(commands::reach::ReachArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr; `CARECAL_LOG` takes an `EnvFilter` directive.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CARECAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Month(args) => commands::month::run(args),
        Commands::Day(args) => commands::day::run(args),
        Commands::Reach(args) => commands::reach::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
