//! Routing-service request contract and IO abstractions.

pub mod request;
pub mod traits;

pub use request::RouteRequest;
pub use traits::{FetchError, RouteFetcher};
