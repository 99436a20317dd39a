use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::distance::calculate_distance;

/// Errors raised when a coordinate fails boundary validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude must be a finite number in [-90, 90], got {0}")]
    InvalidLatitude(f64),

    #[error("longitude must be a finite number in [-180, 180], got {0}")]
    InvalidLongitude(f64),
}

/// A point on the Earth's surface in degrees
///
/// An unknown location is modelled as `Option<Coordinate>::None`, never as
/// `(0, 0)`, which is a real place in the Gulf of Guinea.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range components
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    /// Combine two optional components; unknown if either is missing
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self { latitude, longitude }),
            _ => None,
        }
    }

    /// Rounded great-circle distance to another coordinate in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        calculate_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Store record as supplied by the catalog
///
/// Only `id` and the coordinate are read. Any other field in the incoming
/// document is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Store {
    pub fn new(id: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        Self {
            id: id.into(),
            latitude: coordinate.map(|c| c.latitude),
            longitude: coordinate.map(|c| c.longitude),
            extra: Map::new(),
        }
    }

    /// The store's location, if both components are known
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

/// Store record extended with its distance from the customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedStore {
    #[serde(flatten)]
    pub store: Store,
    /// Kilometers to the customer, or `None` when the customer location is unknown
    pub distance: Option<f64>,
    #[serde(rename = "deliveryFee", default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<Decimal>,
}

impl MatchedStore {
    /// Extend a copy of `store` with a computed distance
    ///
    /// Stale `distance` or `deliveryFee` values carried in the catalog
    /// record are dropped so the computed ones are the only ones emitted.
    pub fn new(store: &Store, distance: Option<f64>) -> Self {
        let mut store = store.clone();
        store.extra.remove("distance");
        store.extra.remove("deliveryFee");

        Self {
            store,
            distance,
            delivery_fee: None,
        }
    }
}

/// One price breakpoint: deliveries up to `max_distance_km` cost `charge`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareTier {
    #[serde(rename = "maxDistanceKm", alias = "max_distance_km")]
    pub max_distance_km: f64,
    pub charge: Decimal,
}

impl FareTier {
    pub fn new(max_distance_km: f64, charge: Decimal) -> Self {
        Self { max_distance_km, charge }
    }
}
