use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::day::{compute_day_influence, DayInfluence};
use super::DISPLAY_SCORE_MAX;
use crate::error::ValidationError;
use crate::event::Event;

/// Six full weeks, Sunday first.
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    /// Only computed for in-month cells.
    pub influence: Option<DayInfluence>,
    /// Clamped 0-100 display score; `None` on padding cells.
    pub score: Option<u8>,
}

impl GridCell {
    fn padding(date: NaiveDate) -> Self {
        Self {
            date,
            is_current_month: false,
            influence: None,
            score: None,
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// A visible month: leading padding, the month's days, trailing padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub leading_days: usize,
    pub trailing_days: usize,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn current_month_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.is_current_month)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.date == date)
    }

    /// Highest display score in the month, 0 for an empty month.
    pub fn peak_score(&self) -> u8 {
        self.current_month_cells()
            .filter_map(|c| c.score)
            .max()
            .unwrap_or(0)
    }
}

/// Clamp a raw total score to the public 0-100 range.
pub fn display_score(total: f64) -> u8 {
    if !total.is_finite() {
        return 0;
    }
    total.clamp(0.0, DISPLAY_SCORE_MAX).round() as u8
}

/// Number of days in a month, `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Build the 42-cell grid for `year`/`month`.
///
/// Every in-month day is scored against the full event slice; events from
/// neighbouring months still reach into this one.
///
/// # Errors
/// Returns [`ValidationError::InvalidMonth`] when the month is outside
/// 1..=12 or the grid would fall outside chrono's date range.
pub fn compute_month_grid(
    year: i32,
    month: u32,
    events: &[Event],
) -> Result<MonthGrid, ValidationError> {
    let invalid = || ValidationError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let month_len = days_in_month(year, month).ok_or_else(invalid)? as usize;
    let leading_days = first.weekday().num_days_from_sunday() as usize;
    let trailing_days = GRID_CELLS - (leading_days + month_len);

    let start = first
        .checked_sub_signed(Duration::days(leading_days as i64))
        .ok_or_else(invalid)?;
    let dates: Vec<NaiveDate> = start.iter_days().take(GRID_CELLS).collect();
    if dates.len() != GRID_CELLS {
        return Err(invalid());
    }

    tracing::debug!(
        year,
        month,
        leading_days,
        trailing_days,
        events = events.len(),
        "computing month grid"
    );

    let cells = dates
        .into_iter()
        .map(|date| {
            if date.year() != year || date.month() != month {
                return GridCell::padding(date);
            }
            let influence = compute_day_influence(date, events);
            let score = display_score(influence.total_score);
            tracing::trace!(%date, raw = influence.total_score, score, "scored day");
            GridCell {
                date,
                is_current_month: true,
                influence: Some(influence),
                score: Some(score),
            }
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        leading_days,
        trailing_days,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn grid_has_42_cells_with_padding() {
        // 2024-03-01 is a Friday.
        let grid = compute_month_grid(2024, 3, &[]).unwrap();
        assert_eq!(grid.cells.len(), GRID_CELLS);
        assert_eq!(grid.leading_days, 5);
        assert_eq!(grid.trailing_days, 42 - (5 + 31));
        assert_eq!(grid.cells[0].date, date(2024, 2, 25));
        assert_eq!(grid.cells[5].date, date(2024, 3, 1));
        assert_eq!(grid.cells[41].date, date(2024, 4, 6));
        assert_eq!(grid.current_month_cells().count(), 31);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        // 2024-09-01 is a Sunday.
        let grid = compute_month_grid(2024, 9, &[]).unwrap();
        assert_eq!(grid.leading_days, 0);
        assert_eq!(grid.trailing_days, 12);
        assert!(grid.cells[0].is_current_month);
    }

    #[test]
    fn padding_cells_are_not_scored() {
        let events = vec![Event::new("a", "Run", Category::Exercise, date(2024, 2, 26), 10)];
        let grid = compute_month_grid(2024, 3, &events).unwrap();

        let padding = grid.cell(date(2024, 2, 26)).unwrap();
        assert!(!padding.is_current_month);
        assert!(padding.influence.is_none());
        assert!(padding.score.is_none());
    }

    #[test]
    fn reach_crosses_month_boundary() {
        let events = vec![
            Event::new("a", "Retreat", Category::Therapy, date(2024, 2, 28), 10)
                .with_reach(1.0, "months"),
        ];
        let grid = compute_month_grid(2024, 3, &events).unwrap();
        let first = grid.cell(date(2024, 3, 1)).unwrap();
        assert!(first.score.unwrap() > 0);
    }

    #[test]
    fn display_score_clamps_and_rounds() {
        assert_eq!(display_score(0.0), 0);
        assert_eq!(display_score(42.4), 42);
        assert_eq!(display_score(42.5), 43);
        assert_eq!(display_score(115.0), 100);
        assert_eq!(display_score(f64::NAN), 0);
    }

    #[test]
    fn capped_day_keeps_raw_total_in_breakdown() {
        let day = date(2024, 3, 12);
        let events: Vec<Event> = (0..3)
            .map(|i| Event::new(i.to_string(), "Gym", Category::Exercise, day, 10))
            .collect();
        let grid = compute_month_grid(2024, 3, &events).unwrap();
        let cell = grid.cell(day).unwrap();

        assert_eq!(cell.score, Some(100));
        assert!(cell.influence.as_ref().unwrap().total_score > 100.0);
        assert_eq!(grid.peak_score(), 100);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let err = compute_month_grid(2024, 0, &[]).unwrap_err();
        assert_eq!(err, ValidationError::InvalidMonth { year: 2024, month: 0 });
        assert!(compute_month_grid(2024, 13, &[]).is_err());
    }

    #[test]
    fn weeks_are_rows_of_seven() {
        let grid = compute_month_grid(2024, 2, &[]).unwrap();
        let weeks: Vec<_> = grid.weeks().collect();
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
    }
}
