//! Pluggable networking traits.
//!
//! External crates implement these to provide route fetching capabilities.

use std::future::Future;
use std::pin::Pin;

use crate::geo_point::GeoPoint;

/// A routing service could not be reached or did not answer successfully.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Routing service returned HTTP {0}")]
    Status(u16),
}

/// Fetch the raw body of a driving-route response between two points.
pub trait RouteFetcher: Send + Sync {
    fn fetch_route<'a>(
        &'a self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>>;
}
