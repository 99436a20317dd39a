use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Coordinate, FareTier, Store};

/// Request to match stores around a customer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchStoresRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Service radius; the configured default applies when absent
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_distance_km", rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
    /// Overrides the configured fare table for this request
    #[serde(alias = "fare_tiers", rename = "fareTiers", default)]
    pub fare_tiers: Option<Vec<FareTier>>,
    #[validate(custom(function = "validate_store_ids"))]
    pub stores: Vec<Store>,
}

fn validate_store_ids(stores: &[Store]) -> Result<(), ValidationError> {
    if stores.iter().any(|store| store.id.trim().is_empty()) {
        let mut error = ValidationError::new("empty_store_id");
        error.message = Some("every store needs a non-empty id".into());
        return Err(error);
    }
    Ok(())
}

/// Request to price a single delivery
///
/// Either `distanceKm` or both `origin` and `destination` must be given.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteFareRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "distance_km", rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub origin: Option<Coordinate>,
    #[serde(default)]
    pub destination: Option<Coordinate>,
    #[serde(alias = "fare_tiers", rename = "fareTiers", default)]
    pub fare_tiers: Option<Vec<FareTier>>,
}
