use chrono::{Datelike, NaiveDate};

use crate::models::availability::slots_on;
use crate::models::Availability;

pub type Week = [Option<NaiveDate>; 7];

/// Weeks of a month, Monday first. Cells outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<Week>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut col = lead;
    let mut day = first;
    while day.month() == month {
        week[col] = Some(day);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    if col > 0 {
        weeks.push(week);
    }
    Some(weeks)
}

/// Pairs each day cell with whether the schedule has any slot on it.
pub fn mark_available(
    grid: &[Week],
    schedule: &[Availability],
) -> Vec<[Option<(NaiveDate, bool)>; 7]> {
    grid.iter()
        .map(|week| (*week).map(|cell| cell.map(|d| (d, !slots_on(schedule, d).is_empty()))))
        .collect()
}
