//! Delivery Geo - store matching and delivery fare engine
//!
//! This library ranks stores by great-circle distance from a customer,
//! filters them to a service radius and prices delivery from a
//! distance-tiered fare table.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{calculate_distance, haversine_distance, match_stores, resolve_charge, FareTable, MatchResult, StoreMatcher};
pub use models::{Coordinate, FareTier, MatchedStore, Store, MatchStoresRequest, MatchStoresResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let customer = Coordinate::new(0.0, 0.0).unwrap();
        let stores = vec![Store::new("a", Some(customer))];
        let matched = match_stores(&stores, Some(customer), 1.0);
        assert_eq!(matched[0].distance, Some(0.0));
    }
}
