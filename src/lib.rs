// Seasonal pricing and quote-resolution engine for the lodging booking site

pub mod catalog;
pub mod model;
pub mod overlap;
pub mod quote;
pub mod resolver;
pub mod season;
pub mod store;

// Re-export key types for convenience
pub use catalog::RateCatalog;
pub use model::{MealPlan, Occupancy, OccupancyPrice, RateOverride, RateOverrideDraft, Room};
pub use overlap::{OverlapValidator, RateOverlapError};
pub use quote::{
    parse_stay_date, NightlyRate, Quote, QuoteBuilder, QuoteConfig, QuoteError, QuoteRequest,
};
pub use resolver::{normalize_day, occupancy_for_guests, PriceResolver};
pub use season::{project_table, RecurringSeason, SeasonError, SeasonWindow};
pub use store::{InMemoryStore, RateStore, RoomStore, WriteError};
