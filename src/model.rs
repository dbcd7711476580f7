// Domain model for rooms and seasonal rate overrides
// Wire codes (RO/BB/HB, SNGL/DBL/TRPL) follow the admin data model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Rooms are owned by the admin side; the pricing engine only reads them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub base_price: u32,
    pub capacity: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealPlan {
    #[serde(rename = "RO")]
    RoomOnly,
    #[serde(rename = "BB")]
    BedBreakfast,
    #[serde(rename = "HB")]
    HalfBoard,
}

impl MealPlan {
    pub fn code(&self) -> &'static str {
        match self {
            MealPlan::RoomOnly => "RO",
            MealPlan::BedBreakfast => "BB",
            MealPlan::HalfBoard => "HB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Occupancy {
    #[serde(rename = "SNGL")]
    Single,
    #[serde(rename = "DBL")]
    Double,
    #[serde(rename = "TRPL")]
    Triple,
}

impl Occupancy {
    pub fn code(&self) -> &'static str {
        match self {
            Occupancy::Single => "SNGL",
            Occupancy::Double => "DBL",
            Occupancy::Triple => "TRPL",
        }
    }
}

// A price of exactly 0 is the "not offered at this occupancy" sentinel,
// not a free night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyPrice {
    pub occupancy: Occupancy,
    pub price: u32,
}

// A date-bounded price exception for one room + meal plan. Bounds are
// inclusive calendar days with no time-of-day component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOverride {
    pub id: String,
    pub room_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meal_plan: MealPlan,
    pub prices: Vec<OccupancyPrice>,
}

impl RateOverride {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn price_for(&self, occupancy: Occupancy) -> Option<u32> {
        self.prices
            .iter()
            .find(|entry| entry.occupancy == occupancy)
            .map(|entry| entry.price)
    }
}

// Candidate submitted by the admin write path; the store assigns the id
// once the overlap check has passed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOverrideDraft {
    pub room_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meal_plan: MealPlan,
    pub prices: Vec<OccupancyPrice>,
}
