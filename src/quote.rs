// Quote building: enumerate every night of a stay, resolve each night's
// price, aggregate into a total with a per-night breakdown. Either both
// preconditions pass and a complete quote comes back, or nothing does —
// there are no partial results.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::RateCatalog;
use crate::model::{MealPlan, Occupancy};
use crate::resolver::{occupancy_for_guests, PriceResolver};
use crate::store::{RateStore, RoomStore};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("room {0} not found")]
    RoomNotFound(String),

    #[error("invalid stay range: {0}")]
    InvalidDateRange(String),
}

// Currency is configuration, not a literal in the quote path
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub currency: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            currency: "RUB".to_string(),
        }
    }
}

// Wire shape of the booking collaborator's quote request. Check-out is
// exclusive; the stay's last night is check_out - 1 day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub meal_plan: Option<MealPlan>,
    #[serde(default)]
    pub occupancy: Option<Occupancy>,
    #[serde(default)]
    pub guests: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyRate {
    pub date: NaiveDate,
    pub price: u32,
}

// Derived value object, constructed fresh per request and never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub nights: u32,
    pub total: u64,
    pub nightly: Vec<NightlyRate>,
    pub currency: String,
}

// Boundary helper for callers holding raw date strings
pub fn parse_stay_date(value: &str) -> Result<NaiveDate, QuoteError> {
    value
        .parse()
        .map_err(|_| QuoteError::InvalidDateRange(format!("unparseable stay date: {value}")))
}

pub struct QuoteBuilder {
    rooms: Arc<dyn RoomStore>,
    resolver: PriceResolver,
    config: QuoteConfig,
}

impl QuoteBuilder {
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        rates: Arc<dyn RateStore>,
        config: QuoteConfig,
    ) -> Self {
        Self {
            rooms,
            resolver: PriceResolver::new(RateCatalog::new(rates)),
            config,
        }
    }

    // Explicit occupancy wins over a guest count; with neither, double
    fn select_occupancy(request: &QuoteRequest) -> Occupancy {
        request
            .occupancy
            .or_else(|| request.guests.map(occupancy_for_guests))
            .unwrap_or(Occupancy::Double)
    }

    pub async fn build_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        if request.check_out <= request.check_in {
            return Err(QuoteError::InvalidDateRange(format!(
                "check-out {} is not after check-in {}",
                request.check_out, request.check_in
            )));
        }

        let room = self
            .rooms
            .get_room(&request.room_id)
            .await
            .filter(|room| room.active)
            .ok_or_else(|| QuoteError::RoomNotFound(request.room_id.clone()))?;

        let nights = (request.check_out - request.check_in).num_days() as u32;
        let occupancy = Self::select_occupancy(request);

        let mut nightly = Vec::with_capacity(nights as usize);
        let mut total: u64 = 0;

        for offset in 0..nights {
            let date = request.check_in + Days::new(offset as u64);
            let price = self
                .resolver
                .resolve(&room, date, request.meal_plan, occupancy)
                .await;
            nightly.push(NightlyRate { date, price });
            total += u64::from(price);
        }

        Ok(Quote {
            nights,
            total,
            nightly,
            currency: self.config.currency.clone(),
        })
    }
}
