//! Calendar arithmetic for a single month.

use crate::error::{MonthGridError, MonthGridResult};
use chrono::{Datelike, NaiveDate};

/// A month as the renderer sees it. Computed fresh for every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    /// Zero-based month index (0 = January).
    pub month_index: u32,
    /// Column of day 1 with Monday = 0 .. Sunday = 6.
    pub first_weekday: u32,
    pub days_in_month: u32,
}

impl MonthView {
    pub fn new(year: i32, month_index: u32) -> MonthGridResult<Self> {
        Ok(Self {
            year,
            month_index,
            first_weekday: first_weekday_monday_first(year, month_index)?,
            days_in_month: days_in_month(year, month_index)?,
        })
    }

    /// (row, column) of `day` in the 7x6 grid.
    pub fn cell_of(&self, day: u32) -> (u32, u32) {
        let offset = self.first_weekday + day - 1;
        (offset / 7, offset % 7)
    }
}

fn first_of_month(year: i32, month_index: u32) -> MonthGridResult<NaiveDate> {
    if month_index >= 12 {
        return Err(MonthGridError::InvalidDate { year, month_index });
    }
    NaiveDate::from_ymd_opt(year, month_index + 1, 1)
        .ok_or(MonthGridError::InvalidDate { year, month_index })
}

/// Number of days in the month (28-31).
///
/// Takes the first day of the following month and steps back one day.
pub fn days_in_month(year: i32, month_index: u32) -> MonthGridResult<u32> {
    let first = first_of_month(year, month_index)?;
    let next_first = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or(MonthGridError::InvalidDate { year, month_index })?;
    let last = next_first
        .pred_opt()
        .ok_or(MonthGridError::InvalidDate { year, month_index })?;
    Ok(last.day())
}

/// Weekday of day 1 remapped so Monday = 0 and Sunday = 6.
pub fn first_weekday_monday_first(year: i32, month_index: u32) -> MonthGridResult<u32> {
    let native = first_of_month(year, month_index)?
        .weekday()
        .num_days_from_sunday();
    Ok(if native == 0 { 6 } else { native - 1 })
}
