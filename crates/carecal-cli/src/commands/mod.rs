pub mod config;
pub mod day;
pub mod month;
pub mod reach;

use std::path::PathBuf;

use carecal_core::{Config, EventStore};
use clap::Args;

/// Where to read events from, shared by the scoring commands.
#[derive(Args, Debug, Clone)]
pub struct EventSource {
    /// Events JSON file (defaults to `data.events_file` from config)
    #[arg(long, short = 'e')]
    pub events: Option<PathBuf>,
    /// Skip invalid events instead of failing
    #[arg(long)]
    pub skip_invalid: bool,
}

impl EventSource {
    pub fn load(&self, config: &Config) -> Result<EventStore, Box<dyn std::error::Error>> {
        let path = self
            .events
            .clone()
            .or_else(|| config.data.events_file.clone())
            .ok_or("no events file: pass --events or set data.events_file")?;

        let store = if self.skip_invalid {
            EventStore::open_lenient(&path)?
        } else {
            EventStore::open(&path)?
        };
        Ok(store)
    }
}
