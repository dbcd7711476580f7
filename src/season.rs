// Recurring seasons: year-agnostic "DD.MM-DD.MM" windows from the static
// price tables. The engine's canonical model is absolute date ranges, so a
// recurring window is only a generator — it projects onto a concrete year
// and the result enters the store through the validated write path like
// any other rate override.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{MealPlan, OccupancyPrice, RateOverrideDraft};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeasonError {
    #[error("malformed season label: {0}")]
    BadLabel(String),
}

// A month/day window with no year, e.g. "01.07-14.07". Windows do not
// wrap across year ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    start_day: u32,
    start_month: u32,
    end_day: u32,
    end_month: u32,
}

impl SeasonWindow {
    pub fn parse(label: &str) -> Result<Self, SeasonError> {
        let bad = || SeasonError::BadLabel(label.to_string());

        let (start_label, end_label) = label.split_once('-').ok_or_else(bad)?;
        let parse_bound = |bound: &str| -> Option<(u32, u32)> {
            let (day, month) = bound.split_once('.')?;
            Some((day.parse().ok()?, month.parse().ok()?))
        };

        let (start_day, start_month) = parse_bound(start_label).ok_or_else(bad)?;
        let (end_day, end_month) = parse_bound(end_label).ok_or_else(bad)?;

        if !(1..=12).contains(&start_month) || !(1..=12).contains(&end_month) {
            return Err(bad());
        }
        if !(1..=31).contains(&start_day) || !(1..=31).contains(&end_day) {
            return Err(bad());
        }

        Ok(Self {
            start_day,
            start_month,
            end_day,
            end_month,
        })
    }

    // None when a bound does not exist in that year (29.02 off leap years)
    // or the window would wrap backwards
    pub fn project(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(year, self.start_month, self.start_day)?;
        let end = NaiveDate::from_ymd_opt(year, self.end_month, self.end_day)?;
        if end < start {
            return None;
        }
        Some((start, end))
    }
}

// One row of a recurring price table: a window plus the prices it carries
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringSeason {
    pub window: SeasonWindow,
    pub meal_plan: MealPlan,
    pub prices: Vec<OccupancyPrice>,
}

impl RecurringSeason {
    pub fn project(&self, room_id: &str, year: i32) -> Option<RateOverrideDraft> {
        let (start_date, end_date) = self.window.project(year)?;
        Some(RateOverrideDraft {
            room_id: room_id.to_string(),
            start_date,
            end_date,
            meal_plan: self.meal_plan,
            prices: self.prices.clone(),
        })
    }
}

// Project a whole recurring table onto one year, dropping windows that do
// not exist in it
pub fn project_table(
    seasons: &[RecurringSeason],
    room_id: &str,
    year: i32,
) -> Vec<RateOverrideDraft> {
    seasons
        .iter()
        .filter_map(|season| season.project(room_id, year))
        .collect()
}
