use crate::core::fares::FareTable;
use crate::models::{Coordinate, MatchedStore, Store};

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub stores: Vec<MatchedStore>,
    pub total_candidates: usize,
    /// Stores dropped because their own location is unknown
    pub unlocatable: usize,
    pub location_known: bool,
}

/// Filter and rank stores by distance from the customer
///
/// # Behaviour
/// * Customer location unknown: every store is returned in input order with
///   `distance: None`. A missing location never empties the list.
/// * Store location unknown: the store is left out.
/// * Otherwise stores within `max_distance_km` (inclusive, on the rounded
///   distance) are returned nearest first. Equal distances keep their input
///   order.
///
/// Input records are cloned into the result, never modified. A stale
/// `distance` or `deliveryFee` on a catalog record is replaced by the
/// computed value.
pub fn match_stores(
    stores: &[Store],
    customer: Option<Coordinate>,
    max_distance_km: f64,
) -> Vec<MatchedStore> {
    let Some(customer) = customer else {
        return stores
            .iter()
            .map(|store| MatchedStore::new(store, None))
            .collect();
    };

    let mut matched: Vec<MatchedStore> = stores
        .iter()
        .filter_map(|store| {
            let distance = customer.distance_to(&store.coordinate()?);
            (distance <= max_distance_km).then(|| MatchedStore::new(store, Some(distance)))
        })
        .collect();

    // sort_by is stable, so ties keep catalog order
    matched.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matched
}

/// Store matcher bound to a delivery fare table
///
/// # Pipeline Stages
/// 1. Distance to each locatable store
/// 2. Radius filter
/// 3. Stable sort by distance
/// 4. Delivery fee per surviving store
#[derive(Debug, Clone, Default)]
pub struct StoreMatcher {
    fares: FareTable,
}

impl StoreMatcher {
    pub fn new(fares: FareTable) -> Self {
        Self { fares }
    }

    /// A matcher that charges nothing for delivery
    pub fn without_fares() -> Self {
        Self::default()
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    /// Match stores and price delivery from each one
    ///
    /// Fees are only computed when the customer location is known; for an
    /// unknown location every store comes back with `delivery_fee: None`.
    pub fn find_stores(
        &self,
        stores: &[Store],
        customer: Option<Coordinate>,
        max_distance_km: f64,
    ) -> MatchResult {
        let total_candidates = stores.len();
        let location_known = customer.is_some();

        let unlocatable = if location_known {
            stores.iter().filter(|s| s.coordinate().is_none()).count()
        } else {
            0
        };

        let mut matched = match_stores(stores, customer, max_distance_km);
        for entry in &mut matched {
            entry.delivery_fee = entry.distance.map(|d| self.fares.charge_for(d));
        }

        MatchResult {
            stores: matched,
            total_candidates,
            unlocatable,
            location_known,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FareTier;
    use rust_decimal::Decimal;

    fn store(id: &str, lat: f64, lon: f64) -> Store {
        Store::new(id, Some(Coordinate { latitude: lat, longitude: lon }))
    }

    fn origin() -> Option<Coordinate> {
        Some(Coordinate { latitude: 0.0, longitude: 0.0 })
    }

    fn ids(matched: &[MatchedStore]) -> Vec<&str> {
        matched.iter().map(|m| m.store.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_distance() {
        let stores = vec![
            store("far", 0.0, 0.2),
            store("near", 0.0, 0.05),
            store("mid", 0.0, 0.1),
        ];

        let matched = match_stores(&stores, origin(), 50.0);

        assert_eq!(ids(&matched), vec!["near", "mid", "far"]);
        assert_eq!(matched[0].distance, Some(5.56));
        assert_eq!(matched[1].distance, Some(11.12));
    }

    #[test]
    fn test_radius_filter_is_inclusive() {
        let stores = vec![store("edge", 0.0, 0.1), store("beyond", 0.0, 0.2)];

        let matched = match_stores(&stores, origin(), 11.12);

        assert_eq!(ids(&matched), vec!["edge"]);
    }

    #[test]
    fn test_unknown_customer_passes_everything_through() {
        let stores = vec![
            store("b", 10.0, 10.0),
            Store::new("no-location", None),
            store("a", 0.0, 0.0),
        ];

        let matched = match_stores(&stores, None, 1.0);

        assert_eq!(ids(&matched), vec!["b", "no-location", "a"]);
        assert!(matched.iter().all(|m| m.distance.is_none()));
    }

    #[test]
    fn test_unlocatable_store_excluded() {
        let stores = vec![
            store("one", 0.0, 0.01),
            Store::new("ghost", None),
            store("two", 0.0, 0.02),
        ];

        let matched = match_stores(&stores, origin(), 100.0);

        assert_eq!(ids(&matched), vec!["one", "two"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // All three sit exactly 0.1 degrees from the origin
        let stores = vec![
            store("east", 0.0, 0.1),
            store("north", 0.1, 0.0),
            store("west", 0.0, -0.1),
        ];

        let matched = match_stores(&stores, origin(), 20.0);

        assert_eq!(ids(&matched), vec!["east", "north", "west"]);
    }

    #[test]
    fn test_zero_radius_keeps_only_coincident_store() {
        let stores = vec![store("next-door", 0.0, 0.01), store("here", 0.0, 0.0)];

        let matched = match_stores(&stores, origin(), 0.0);

        assert_eq!(ids(&matched), vec!["here"]);
        assert_eq!(matched[0].distance, Some(0.0));
    }

    #[test]
    fn test_antipodal_store_kept_within_wide_radius() {
        let customer = Some(Coordinate { latitude: 2.5, longitude: 0.0 });
        let stores = vec![store("antipode", -2.5, -180.0)];

        let matched = match_stores(&stores, customer, 30_000.0);

        assert_eq!(ids(&matched), vec!["antipode"]);
        assert!(matched[0].distance.is_some_and(f64::is_finite));
    }

    #[test]
    fn test_negative_radius_is_empty() {
        let stores = vec![store("here", 0.0, 0.0)];

        assert!(match_stores(&stores, origin(), -1.0).is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let stores = vec![store("far", 0.0, 0.2), store("near", 0.0, 0.05)];
        let before = stores.clone();

        let _ = match_stores(&stores, origin(), 50.0);

        assert_eq!(stores, before);
    }

    #[test]
    fn test_find_stores_prices_delivery() {
        let matcher = StoreMatcher::new(FareTable::new(vec![
            FareTier::new(10.0, Decimal::from(20)),
            FareTier::new(6.0, Decimal::from(10)),
        ]));
        let stores = vec![
            store("mid", 0.0, 0.1),
            Store::new("ghost", None),
            store("near", 0.0, 0.05),
        ];

        let result = matcher.find_stores(&stores, origin(), 50.0);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.unlocatable, 1);
        assert!(result.location_known);
        assert_eq!(ids(&result.stores), vec!["near", "mid"]);
        assert_eq!(result.stores[0].delivery_fee, Some(Decimal::from(10)));
        // 11.12 km is beyond every tier, so the top tier applies
        assert_eq!(result.stores[1].delivery_fee, Some(Decimal::from(20)));
    }

    #[test]
    fn test_find_stores_without_location_has_no_fees() {
        let matcher = StoreMatcher::new(FareTable::new(vec![FareTier::new(5.0, Decimal::from(10))]));
        let stores = vec![store("a", 0.0, 0.1), Store::new("ghost", None)];

        let result = matcher.find_stores(&stores, None, 50.0);

        assert!(!result.location_known);
        assert_eq!(result.unlocatable, 0);
        assert_eq!(result.stores.len(), 2);
        assert!(result.stores.iter().all(|m| m.delivery_fee.is_none()));
    }

    #[test]
    fn test_without_fares_charges_zero() {
        let matcher = StoreMatcher::without_fares();
        let result = matcher.find_stores(&[store("a", 0.0, 0.05)], origin(), 10.0);

        assert_eq!(result.stores[0].delivery_fee, Some(Decimal::ZERO));
    }
}
