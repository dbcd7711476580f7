// Write-path guard: no two rate overrides for the same room + meal plan
// may have intersecting date ranges. Bounds are inclusive, so two ranges
// conflict iff existing.start <= candidate.end AND existing.end >= candidate.start.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{MealPlan, RateOverride, RateOverrideDraft};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "candidate range intersects existing rate override {conflicting_id} \
     ({meal_plan:?} {conflicting_start}..={conflicting_end})"
)]
pub struct RateOverlapError {
    pub conflicting_id: String,
    pub meal_plan: MealPlan,
    pub conflicting_start: NaiveDate,
    pub conflicting_end: NaiveDate,
}

pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

pub struct OverlapValidator;

impl OverlapValidator {
    // Scan existing overrides for the candidate's room + meal plan. On
    // update the override's own id is excluded from the comparison.
    pub fn check(
        candidate: &RateOverrideDraft,
        exclude_id: Option<&str>,
        existing: &[RateOverride],
    ) -> Result<(), RateOverlapError> {
        for rate in existing {
            if Some(rate.id.as_str()) == exclude_id {
                continue;
            }
            if rate.room_id != candidate.room_id || rate.meal_plan != candidate.meal_plan {
                continue;
            }
            if ranges_overlap(
                rate.start_date,
                rate.end_date,
                candidate.start_date,
                candidate.end_date,
            ) {
                return Err(RateOverlapError {
                    conflicting_id: rate.id.clone(),
                    meal_plan: rate.meal_plan,
                    conflicting_start: rate.start_date,
                    conflicting_end: rate.end_date,
                });
            }
        }

        Ok(())
    }
}
