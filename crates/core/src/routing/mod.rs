pub mod osrm;

use commonspot_navigation::network::{FetchError, RouteFetcher};
use commonspot_navigation::{GeoPoint, ParseError, Route, parse_route_detailed};
use tracing::warn;

pub use osrm::OsrmClient;

/// Why no route could be produced for a request.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl RouteError {
    /// Transport failures may succeed on retry; malformed responses will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RouteError::Fetch(_))
    }
}

/// Fetch and parse a route between two points.
pub async fn fetch_route(
    fetcher: &dyn RouteFetcher,
    origin: GeoPoint,
    destination: GeoPoint,
) -> Result<Route, RouteError> {
    let body = fetcher.fetch_route(origin, destination).await?;
    let outcome = parse_route_detailed(&body)?;

    if !outcome.skipped.is_empty() {
        warn!(
            skipped = outcome.skipped.len(),
            kept = outcome.route.steps().len(),
            "route had steps without a usable maneuver location"
        );
    }

    Ok(outcome.route)
}
