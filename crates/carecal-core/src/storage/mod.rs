mod config;
pub mod event_store;

pub use config::{Config, DataConfig, DisplayConfig};
pub use event_store::EventStore;

use std::path::PathBuf;

/// Returns `~/.config/carecal[-dev]/` based on CARECAL_ENV.
///
/// Set CARECAL_ENV=dev to use the development data directory, or
/// CARECAL_HOME to replace `~/.config` entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = match std::env::var_os("CARECAL_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("CARECAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("carecal-dev")
    } else {
        base_dir.join("carecal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
