//! HTTP client for OSRM-compatible routing services.

use std::future::Future;
use std::pin::Pin;

use commonspot_navigation::network::{FetchError, RouteFetcher, RouteRequest};
use commonspot_navigation::GeoPoint;
use tracing::debug;

use crate::config::RoutingConfig;

pub struct OsrmClient {
    http: reqwest::Client,
    config: RoutingConfig,
}

impl OsrmClient {
    pub fn new(config: RoutingConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn request_url(&self, origin: GeoPoint, destination: GeoPoint) -> String {
        RouteRequest {
            profile: self.config.profile.clone(),
            origin,
            destination,
        }
        .url(&self.config.base_url)
    }
}

impl RouteFetcher for OsrmClient {
    fn fetch_route<'a>(
        &'a self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.request_url(origin, destination);
            debug!(%url, "requesting route");

            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            Ok(body.to_vec())
        })
    }
}
