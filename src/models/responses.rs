use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::models::domain::MatchedStore;

/// Response for the store match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStoresResponse {
    pub stores: Vec<MatchedStore>,
    pub total_candidates: usize,
    pub total_results: usize,
    pub unlocatable: usize,
    pub location_known: bool,
}

/// Response for the fare quote endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFareResponse {
    pub quote_id: String,
    pub distance_km: f64,
    pub charge: Decimal,
    pub quoted_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code: 400,
        }
    }
}
