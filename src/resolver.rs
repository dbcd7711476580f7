// Nightly price resolution: seasonal override if one covers the night,
// otherwise the room's base price. Resolution never fails; a missing or
// sentinel-zero occupancy price falls back to base.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::model::{MealPlan, Occupancy, Room};

// Strip the time-of-day component so the same logical day always resolves
// to the same price, however the caller represented it
pub fn normalize_day(value: DateTime<Utc>) -> NaiveDate {
    value.date_naive()
}

// Deterministic guest-count mapping used when callers do not pick an
// explicit occupancy: 0-1 guests single, 2 double, 3 or more triple
pub fn occupancy_for_guests(guests: u32) -> Occupancy {
    match guests {
        0 | 1 => Occupancy::Single,
        2 => Occupancy::Double,
        _ => Occupancy::Triple,
    }
}

pub struct PriceResolver {
    catalog: RateCatalog,
}

impl PriceResolver {
    pub fn new(catalog: RateCatalog) -> Self {
        Self { catalog }
    }

    pub async fn resolve(
        &self,
        room: &Room,
        date: NaiveDate,
        meal_plan: Option<MealPlan>,
        occupancy: Occupancy,
    ) -> u32 {
        let matched = self
            .catalog
            .find_rate_override(&room.id, meal_plan, date)
            .await;

        match matched {
            Some(rate) => match rate.price_for(occupancy) {
                // 0 is the "not offered at this occupancy" sentinel
                Some(price) if price > 0 => price,
                _ => {
                    debug!(
                        room_id = %room.id,
                        rate_id = %rate.id,
                        occupancy = occupancy.code(),
                        %date,
                        "override matched without a usable occupancy price; using base"
                    );
                    room.base_price
                }
            },
            None => room.base_price,
        }
    }
}
