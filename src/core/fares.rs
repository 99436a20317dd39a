use crate::models::FareTier;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised when a fare table fails boundary validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareTableError {
    #[error("tier {index}: max distance must be a finite, non-negative number of km, got {value}")]
    InvalidDistance { index: usize, value: f64 },

    #[error("tier {index}: charge must not be negative, got {value}")]
    NegativeCharge { index: usize, value: Decimal },
}

#[inline]
fn by_max_distance(a: &FareTier, b: &FareTier) -> Ordering {
    a.max_distance_km
        .partial_cmp(&b.max_distance_km)
        .unwrap_or(Ordering::Equal)
}

/// Resolve the delivery charge for a distance from an unordered tier list
///
/// Tiers are sorted on a copy, so callers may pass them in any order and
/// share the same slice between requests. The first tier whose
/// `max_distance_km` covers the distance wins; a distance beyond every tier
/// gets the largest tier's charge. An empty list means free delivery.
pub fn resolve_charge(distance_km: f64, tiers: &[FareTier]) -> Decimal {
    let mut sorted: Vec<&FareTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| by_max_distance(a, b));

    charge_in_sorted(distance_km, sorted.into_iter())
}

fn charge_in_sorted<'a, I>(distance_km: f64, sorted: I) -> Decimal
where
    I: Iterator<Item = &'a FareTier>,
{
    let mut last = None;
    for tier in sorted {
        if tier.max_distance_km >= distance_km {
            return tier.charge;
        }
        last = Some(tier.charge);
    }

    // Saturate at the top tier
    last.unwrap_or(Decimal::ZERO)
}

/// Fare tiers held in ascending `max_distance_km` order
///
/// Sorting happens once at construction, so a table can price every store
/// in a match result without re-sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareTable {
    tiers: Vec<FareTier>,
}

impl FareTable {
    pub fn new(mut tiers: Vec<FareTier>) -> Self {
        tiers.sort_by(by_max_distance);
        Self { tiers }
    }

    /// Build a table, rejecting malformed tiers
    pub fn try_new(tiers: Vec<FareTier>) -> Result<Self, FareTableError> {
        for (index, tier) in tiers.iter().enumerate() {
            if !tier.max_distance_km.is_finite() || tier.max_distance_km < 0.0 {
                return Err(FareTableError::InvalidDistance {
                    index,
                    value: tier.max_distance_km,
                });
            }
            if tier.charge < Decimal::ZERO {
                return Err(FareTableError::NegativeCharge {
                    index,
                    value: tier.charge,
                });
            }
        }

        Ok(Self::new(tiers))
    }

    /// Charge for a delivery of `distance_km`, saturating at the top tier
    pub fn charge_for(&self, distance_km: f64) -> Decimal {
        charge_in_sorted(distance_km, self.tiers.iter())
    }

    pub fn tiers(&self) -> &[FareTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl From<Vec<FareTier>> for FareTable {
    fn from(tiers: Vec<FareTier>) -> Self {
        Self::new(tiers)
    }
}
