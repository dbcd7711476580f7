// Storage contracts for the pricing engine, plus the in-memory reference
// store used by tests, seed fixtures and benches. Real deployments put a
// database behind these traits; the write path must keep the overlap check
// and the insert/update inside one serializable transaction.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

use crate::model::{Occupancy, RateOverride, RateOverrideDraft, Room};
use crate::overlap::{OverlapValidator, RateOverlapError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("room {0} not found")]
    RoomNotFound(String),

    #[error("rate override {0} not found")]
    RateOverrideNotFound(String),

    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("duplicate occupancy {} in candidate prices", .0.code())]
    DuplicateOccupancy(Occupancy),

    #[error(transparent)]
    Overlap(#[from] RateOverlapError),
}

// Read side consumed by the quote path
#[async_trait]
pub trait RoomStore: Send + Sync + 'static {
    async fn get_room(&self, room_id: &str) -> Option<Room>;

    // The public site addresses rooms by slug
    async fn room_by_slug(&self, slug: &str) -> Option<Room>;
}

// Rate override read/write contract. Writes are exposed to the admin
// collaborator and gate every future read through the overlap invariant.
#[async_trait]
pub trait RateStore: Send + Sync + 'static {
    async fn rate_overrides_for(&self, room_id: &str) -> Vec<RateOverride>;

    async fn create_rate_override(
        &self,
        candidate: RateOverrideDraft,
    ) -> Result<RateOverride, WriteError>;

    async fn update_rate_override(
        &self,
        id: &str,
        candidate: RateOverrideDraft,
    ) -> Result<RateOverride, WriteError>;
}

pub struct InMemoryStore {
    rooms: DashMap<String, Room>,
    // Rate overrides keyed by room id
    rates: DashMap<String, Vec<RateOverride>>,
    next_rate_id: AtomicU64,
    // Admin writes are rare; a single guard serializes check-then-write so
    // two concurrent writers can never both pass the overlap scan against
    // a stale snapshot. Reads stay lock-free on the sharded maps.
    write_guard: Mutex<()>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            rates: DashMap::new(),
            next_rate_id: AtomicU64::new(1),
            write_guard: Mutex::new(()),
        }
    }

    pub fn insert_room(&self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    // Unvalidated bulk load for seed fixtures. Production writes go through
    // create/update; this path can knowingly install a violated invariant,
    // which the read side must tolerate.
    pub fn load_rate_overrides(&self, overrides: Vec<RateOverride>) {
        for rate in overrides {
            self.rates
                .entry(rate.room_id.clone())
                .or_default()
                .push(rate);
        }
    }

    fn validate_candidate(&self, candidate: &RateOverrideDraft) -> Result<(), WriteError> {
        if !self.rooms.contains_key(&candidate.room_id) {
            return Err(WriteError::RoomNotFound(candidate.room_id.clone()));
        }
        if candidate.end_date < candidate.start_date {
            return Err(WriteError::InvalidRange {
                start: candidate.start_date,
                end: candidate.end_date,
            });
        }
        let mut seen: Vec<Occupancy> = Vec::with_capacity(candidate.prices.len());
        for entry in &candidate.prices {
            if seen.contains(&entry.occupancy) {
                return Err(WriteError::DuplicateOccupancy(entry.occupancy));
            }
            seen.push(entry.occupancy);
        }
        Ok(())
    }

    fn check_overlap(
        &self,
        candidate: &RateOverrideDraft,
        exclude_id: Option<&str>,
    ) -> Result<(), RateOverlapError> {
        let existing = self
            .rates
            .get(&candidate.room_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        OverlapValidator::check(candidate, exclude_id, &existing)
    }

    fn next_id(&self) -> String {
        format!("rate-{}", self.next_rate_id.fetch_add(1, Ordering::SeqCst))
    }

    // Locate the room currently holding the override with this id
    fn room_holding(&self, id: &str) -> Option<String> {
        self.rates
            .iter()
            .find(|entry| entry.value().iter().any(|rate| rate.id == id))
            .map(|entry| entry.key().clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomStore for InMemoryStore {
    async fn get_room(&self, room_id: &str) -> Option<Room> {
        self.rooms.get(room_id).map(|entry| entry.value().clone())
    }

    async fn room_by_slug(&self, slug: &str) -> Option<Room> {
        self.rooms
            .iter()
            .find(|entry| entry.value().slug == slug)
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl RateStore for InMemoryStore {
    async fn rate_overrides_for(&self, room_id: &str) -> Vec<RateOverride> {
        self.rates
            .get(room_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn create_rate_override(
        &self,
        candidate: RateOverrideDraft,
    ) -> Result<RateOverride, WriteError> {
        let _guard = self.write_guard.lock();

        self.validate_candidate(&candidate)?;
        self.check_overlap(&candidate, None)?;

        let rate = RateOverride {
            id: self.next_id(),
            room_id: candidate.room_id,
            start_date: candidate.start_date,
            end_date: candidate.end_date,
            meal_plan: candidate.meal_plan,
            prices: candidate.prices,
        };
        self.rates
            .entry(rate.room_id.clone())
            .or_default()
            .push(rate.clone());

        info!(
            rate_id = %rate.id,
            room_id = %rate.room_id,
            meal_plan = rate.meal_plan.code(),
            start = %rate.start_date,
            end = %rate.end_date,
            "rate override created"
        );
        Ok(rate)
    }

    async fn update_rate_override(
        &self,
        id: &str,
        candidate: RateOverrideDraft,
    ) -> Result<RateOverride, WriteError> {
        let _guard = self.write_guard.lock();

        let current_room = self
            .room_holding(id)
            .ok_or_else(|| WriteError::RateOverrideNotFound(id.to_string()))?;

        self.validate_candidate(&candidate)?;
        self.check_overlap(&candidate, Some(id))?;

        // The override may move to another room; drop it from the old
        // table before inserting the replacement
        if let Some(mut entry) = self.rates.get_mut(&current_room) {
            entry.retain(|rate| rate.id != id);
        }

        let rate = RateOverride {
            id: id.to_string(),
            room_id: candidate.room_id,
            start_date: candidate.start_date,
            end_date: candidate.end_date,
            meal_plan: candidate.meal_plan,
            prices: candidate.prices,
        };
        self.rates
            .entry(rate.room_id.clone())
            .or_default()
            .push(rate.clone());

        info!(
            rate_id = %rate.id,
            room_id = %rate.room_id,
            meal_plan = rate.meal_plan.code(),
            start = %rate.start_date,
            end = %rate.end_date,
            "rate override updated"
        );
        Ok(rate)
    }
}
