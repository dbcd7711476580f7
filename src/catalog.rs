// Read-only view of a room's rate overrides. Because the write path keeps
// ranges non-overlapping per room + meal plan, at most one override can
// match a given date; if seeded data violated that, this read path still
// answers deterministically instead of erroring.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::model::{MealPlan, RateOverride};
use crate::store::RateStore;

pub struct RateCatalog {
    store: Arc<dyn RateStore>,
}

impl RateCatalog {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    // Returns the single override whose inclusive range contains the date.
    // With no meal-plan filter any plan matches; selection stays
    // deterministic through (start_date, meal_plan, id) ordering, so a
    // violated invariant resolves to the earliest-starting override.
    pub async fn find_rate_override(
        &self,
        room_id: &str,
        meal_plan: Option<MealPlan>,
        date: NaiveDate,
    ) -> Option<RateOverride> {
        let mut matches: Vec<RateOverride> = self
            .store
            .rate_overrides_for(room_id)
            .await
            .into_iter()
            .filter(|rate| rate.covers(date))
            .filter(|rate| meal_plan.map_or(true, |plan| rate.meal_plan == plan))
            .collect();

        // Two plans covering one date is normal; two overrides for the
        // same plan means a writer got past the overlap guard
        let mut plans: Vec<MealPlan> = matches.iter().map(|rate| rate.meal_plan).collect();
        plans.sort();
        if plans.windows(2).any(|pair| pair[0] == pair[1]) {
            warn!(
                room_id,
                %date,
                matches = matches.len(),
                "overlapping rate overrides on the read path; taking earliest start"
            );
        }

        matches.sort_by(|a, b| {
            (a.start_date, a.meal_plan, &a.id).cmp(&(b.start_date, b.meal_plan, &b.id))
        });
        matches.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OccupancyPrice, RateOverride};
    use crate::model::{Occupancy, Room};
    use crate::store::InMemoryStore;

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn rate(id: &str, start: &str, end: &str, meal_plan: MealPlan, double: u32) -> RateOverride {
        RateOverride {
            id: id.to_string(),
            room_id: "room1".to_string(),
            start_date: date(start),
            end_date: date(end),
            meal_plan,
            prices: vec![OccupancyPrice {
                occupancy: Occupancy::Double,
                price: double,
            }],
        }
    }

    fn seeded_catalog(rates: Vec<RateOverride>) -> RateCatalog {
        let store = InMemoryStore::new();
        store.insert_room(Room {
            id: "room1".to_string(),
            slug: "standard-sea-view".to_string(),
            name: "Standard sea view".to_string(),
            base_price: 4200,
            capacity: 2,
            active: true,
        });
        store.load_rate_overrides(rates);
        RateCatalog::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_finds_covering_override() {
        let catalog = seeded_catalog(vec![rate(
            "rate1",
            "2024-07-01",
            "2024-08-31",
            MealPlan::BedBreakfast,
            5200,
        )]);

        let found = catalog
            .find_rate_override("room1", Some(MealPlan::BedBreakfast), date("2024-07-10"))
            .await;
        assert_eq!(found.map(|r| r.id), Some("rate1".to_string()));

        let outside = catalog
            .find_rate_override("room1", Some(MealPlan::BedBreakfast), date("2024-09-01"))
            .await;
        assert!(outside.is_none());
    }

    #[tokio::test]
    async fn test_meal_plan_filter() {
        let catalog = seeded_catalog(vec![
            rate("rate-bb", "2024-07-01", "2024-08-31", MealPlan::BedBreakfast, 5200),
            rate("rate-hb", "2024-07-01", "2024-08-31", MealPlan::HalfBoard, 6100),
        ]);

        let half_board = catalog
            .find_rate_override("room1", Some(MealPlan::HalfBoard), date("2024-07-10"))
            .await;
        assert_eq!(half_board.map(|r| r.id), Some("rate-hb".to_string()));

        let room_only = catalog
            .find_rate_override("room1", Some(MealPlan::RoomOnly), date("2024-07-10"))
            .await;
        assert!(room_only.is_none());
    }

    #[tokio::test]
    async fn test_no_filter_matches_any_plan_deterministically() {
        let catalog = seeded_catalog(vec![
            rate("rate-hb", "2024-07-01", "2024-08-31", MealPlan::HalfBoard, 6100),
            rate("rate-bb", "2024-07-05", "2024-08-31", MealPlan::BedBreakfast, 5200),
        ]);

        // Earliest start wins regardless of insertion order
        let found = catalog
            .find_rate_override("room1", None, date("2024-07-10"))
            .await;
        assert_eq!(found.map(|r| r.id), Some("rate-hb".to_string()));
    }

    #[tokio::test]
    async fn test_violated_invariant_resolves_to_earliest_start() {
        // Bulk-loaded fixtures with overlapping ranges for the same plan;
        // the read path must keep answering, repeatably
        let catalog = seeded_catalog(vec![
            rate("rate-late", "2024-07-05", "2024-08-31", MealPlan::BedBreakfast, 5600),
            rate("rate-early", "2024-07-01", "2024-07-20", MealPlan::BedBreakfast, 5200),
        ]);

        for _ in 0..3 {
            let found = catalog
                .find_rate_override("room1", Some(MealPlan::BedBreakfast), date("2024-07-10"))
                .await;
            assert_eq!(found.map(|r| r.id), Some("rate-early".to_string()));
        }
    }

    #[tokio::test]
    async fn test_unknown_room_has_no_overrides() {
        let catalog = seeded_catalog(vec![]);
        let found = catalog
            .find_rate_override("room9", None, date("2024-07-10"))
            .await;
        assert!(found.is_none());
    }
}
