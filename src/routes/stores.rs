use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{round_km, FareTable, FareTableError, StoreMatcher};
use crate::models::{
    Coordinate, CoordinateError, ErrorResponse, FareTier, HealthResponse, MatchStoresRequest,
    MatchStoresResponse, QuoteFareRequest, QuoteFareResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: StoreMatcher,
    pub matching: MatchingSettings,
}

/// Configure all store and fare routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/stores/match", web::post().to(match_stores))
        .route("/fares/quote", web::post().to(quote_fare));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Validate a coordinate supplied by a client
fn checked(coordinate: Option<Coordinate>) -> Result<Option<Coordinate>, CoordinateError> {
    coordinate
        .map(|c| Coordinate::new(c.latitude, c.longitude))
        .transpose()
}

/// Build a request-scoped fare table when the client sends its own tiers
fn fare_override(tiers: &Option<Vec<FareTier>>) -> Result<Option<FareTable>, FareTableError> {
    tiers.clone().map(FareTable::try_new).transpose()
}

/// Match stores endpoint
///
/// POST /api/v1/stores/match
///
/// Request body:
/// ```json
/// {
///   "latitude": -26.2041,
///   "longitude": 28.0473,
///   "maxDistanceKm": 10,
///   "limit": 20,
///   "fareTiers": [{"maxDistanceKm": 5, "charge": "10.00"}],
///   "stores": [{"id": "string", "latitude": 0.0, "longitude": 0.0}]
/// }
/// ```
async fn match_stores(
    state: web::Data<AppState>,
    req: web::Json<MatchStoresRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match_stores request: {}", errors);
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Validation failed", errors.to_string()));
    }

    let customer = match checked(Coordinate::from_parts(req.latitude, req.longitude)) {
        Ok(customer) => customer,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Invalid coordinate", e.to_string()));
        }
    };

    let request_matcher = match fare_override(&req.fare_tiers) {
        Ok(table) => table.map(StoreMatcher::new),
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Invalid fare tiers", e.to_string()));
        }
    };
    let matcher = request_matcher.as_ref().unwrap_or(&state.matcher);

    let max_distance_km = req
        .max_distance_km
        .unwrap_or(state.matching.default_max_distance_km);

    if customer.is_none() {
        tracing::debug!("No customer location, returning {} stores unranked", req.stores.len());
    }

    let mut result = matcher.find_stores(&req.stores, customer, max_distance_km);

    let limit = match (req.limit, state.matching.max_results) {
        (Some(requested), Some(cap)) => Some(requested.min(cap)),
        (requested, cap) => requested.or(cap),
    };
    if let Some(limit) = limit {
        result.stores.truncate(limit);
    }

    if result.unlocatable > 0 {
        tracing::debug!("Skipped {} stores without coordinates", result.unlocatable);
    }

    let response = MatchStoresResponse {
        total_results: result.stores.len(),
        stores: result.stores,
        total_candidates: result.total_candidates,
        unlocatable: result.unlocatable,
        location_known: result.location_known,
    };

    tracing::info!(
        "Returning {} stores within {} km (from {} candidates)",
        response.total_results,
        max_distance_km,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Fare quote endpoint
///
/// POST /api/v1/fares/quote
///
/// Request body (either `distanceKm` or both coordinates):
/// ```json
/// {
///   "distanceKm": 7.5,
///   "origin": {"latitude": 0.0, "longitude": 0.0},
///   "destination": {"latitude": 0.0, "longitude": 0.1},
///   "fareTiers": [{"maxDistanceKm": 5, "charge": "10.00"}]
/// }
/// ```
async fn quote_fare(
    state: web::Data<AppState>,
    req: web::Json<QuoteFareRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for quote_fare request: {}", errors);
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Validation failed", errors.to_string()));
    }

    let endpoints = checked(req.origin).and_then(|o| checked(req.destination).map(|d| (o, d)));
    let distance_km = match (req.distance_km, endpoints) {
        (_, Err(e)) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Invalid coordinate", e.to_string()));
        }
        (Some(distance_km), Ok(_)) => round_km(distance_km),
        (None, Ok((Some(origin), Some(destination)))) => origin.distance_to(&destination),
        (None, Ok(_)) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
                "Missing distance",
                "provide distanceKm or both origin and destination",
            ));
        }
    };

    let charge = match fare_override(&req.fare_tiers) {
        Ok(Some(table)) => table.charge_for(distance_km),
        Ok(None) => state.matcher.fares().charge_for(distance_km),
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Invalid fare tiers", e.to_string()));
        }
    };

    tracing::debug!("Quoted {} for {} km", charge, distance_km);

    HttpResponse::Ok().json(QuoteFareResponse {
        quote_id: uuid::Uuid::new_v4().to_string(),
        distance_km,
        charge,
        quoted_at: chrono::Utc::now(),
    })
}
