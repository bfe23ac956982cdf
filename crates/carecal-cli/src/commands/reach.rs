use clap::Args;

use carecal_core::{reach_to_days, ReachUnit};

#[derive(Args, Debug)]
pub struct ReachArgs {
    /// Reach magnitude; non-positive values count as 1
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
    /// days, weeks, months or years
    #[arg(default_value = "days")]
    pub unit: String,
}

pub fn run(args: ReachArgs) -> Result<(), Box<dyn std::error::Error>> {
    let unit = ReachUnit::from(args.unit.as_str());
    if let ReachUnit::Other(raw) = &unit {
        tracing::warn!(unit = %raw, "unrecognized reach unit, treating as days");
    }
    println!("{}", reach_to_days(Some(args.value), &unit));
    Ok(())
}
