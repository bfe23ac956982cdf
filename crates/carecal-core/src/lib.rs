//! # carecal Core Library
//!
//! This library scores how much logged self-care activity influences each
//! calendar day and arranges those scores into a month heatmap. It follows a
//! CLI-first layout: the `carecal` binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Influence engine**: pure functions combining same-day ("direct") and
//!   decayed earlier ("reach") activity into a bounded day score
//! - **Month grid**: 42-cell calendar view with per-day scores
//! - **Storage**: JSON event source and TOML configuration
//! - **Palette**: category colors and heat levels for presentation
//!
//! ## Key Components
//!
//! - [`compute_day_influence`]: score and breakdown for one date
//! - [`compute_month_grid`]: scored month grid
//! - [`reach_to_days`]: reach `(value, unit)` to days
//! - [`EventStore`]: validated events loaded from disk
//! - [`Config`]: application configuration management

pub mod breakdown;
pub mod error;
pub mod event;
pub mod influence;
pub mod palette;
pub mod storage;

pub use error::{ConfigError, CoreError, ValidationError};
pub use event::{Category, Event, EventDuration, ReachUnit};
pub use influence::{
    compute_day_influence, compute_month_grid, reach_to_days, DayInfluence, DirectEvent, GridCell,
    MonthGrid, ReachContribution,
};
pub use palette::{CategoryStyle, HeatLevel, Palette};
pub use storage::{Config, EventStore};
