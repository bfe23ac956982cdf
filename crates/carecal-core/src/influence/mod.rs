//! Influence scoring engine.
//!
//! A day's influence is made of two parts:
//!
//! - **direct**: activities logged on the day itself, scored from their
//!   impact with a small duration bonus and a logarithmic soft cap.
//! - **reach**: activities from earlier days whose benefit is still being
//!   felt, decaying exponentially over the activity's reach window.
//!
//! Everything here is a pure function of `(date, &[Event])`. Nothing is
//! cached and nothing is mutated, so results can be recomputed freely.
//!
//! The calibration constants below must stay as they are: existing scores
//! on existing data depend on reproducing this arithmetic exactly.

mod day;
mod month;
mod reach;

pub use day::{compute_day_influence, DayInfluence, DirectEvent, ReachContribution};
pub use month::{compute_month_grid, days_in_month, display_score, GridCell, MonthGrid, GRID_CELLS};
pub use reach::reach_to_days;

/// Direct points per impact point (impact 10 = 100%).
pub const IMPACT_SCALE: f64 = 10.0;
/// Multiplier for all-day activities.
pub const ALL_DAY_BONUS: f64 = 1.10;
/// Multiplier for timed activities of at least [`LONG_SESSION_MINUTES`].
pub const LONG_SESSION_BONUS: f64 = 1.05;
pub const LONG_SESSION_MINUTES: u32 = 120;

/// Direct score above which the soft cap kicks in.
pub const SOFT_CAP_THRESHOLD: f64 = 100.0;
/// Points per doubling above the threshold.
pub const SOFT_CAP_SLOPE: f64 = 15.0;
/// Hard ceiling for the direct score.
pub const DIRECT_SCORE_MAX: f64 = 120.0;

/// Fraction of peak influence left at `reach_days * DECAY_WINDOW_FRACTION`.
pub const DECAY_BASE: f64 = 0.2;
pub const DECAY_WINDOW_FRACTION: f64 = 0.2;
/// Keeps reach secondary to same-day credit.
pub const REACH_SUPPRESSION: f64 = 0.3;
/// Reach weight when competing with a direct score.
pub const REACH_FLOOR_MULTIPLIER: f64 = 1.2;
/// Contributions at or below this effect are left out of the breakdown.
pub const CONTRIBUTION_NOISE_FLOOR: f64 = 0.5;

/// Upper bound of the public display score.
pub const DISPLAY_SCORE_MAX: f64 = 100.0;
