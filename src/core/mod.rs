// Core algorithm exports
pub mod distance;
pub mod fares;
pub mod matcher;

pub use distance::{calculate_distance, haversine_distance, round_km};
pub use fares::{resolve_charge, FareTable, FareTableError};
pub use matcher::{match_stores, MatchResult, StoreMatcher};
