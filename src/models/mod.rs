// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, CoordinateError, FareTier, MatchedStore, Store};
pub use requests::{MatchStoresRequest, QuoteFareRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchStoresResponse, QuoteFareResponse};
