use std::sync::Arc;

use commonspot_core::navigation::GeoPoint;
use commonspot_core::{NavigationConfig, NavigationController, RoutingConfig};

use crate::logging::setup_logging;
use crate::types::{
    Coordinate, NavigationError, NavigationUpdate, ProgressInfo, RouteStatus, SessionStatus,
    StepInfo, saturating_u32,
};

/// Handle held by the host app for the lifetime of a navigation screen.
#[derive(uniffi::Object)]
pub struct NavigationState {
    controller: NavigationController,
}

impl NavigationState {
    pub(crate) fn from_controller(controller: NavigationController) -> Self {
        Self { controller }
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl NavigationState {
    /// Connects to `base_url`, or the public OSRM demo server when `None`.
    #[uniffi::constructor]
    pub fn new(base_url: Option<String>) -> Result<Arc<Self>, NavigationError> {
        setup_logging();

        let routing = match base_url {
            Some(url) => RoutingConfig::with_base_url(url),
            None => RoutingConfig::default(),
        };
        let controller = NavigationController::with_osrm(routing, NavigationConfig::default())
            .map_err(|e| NavigationError::Setup(e.to_string()))?;

        tracing::info!("navigation state created");
        Ok(Arc::new(Self::from_controller(controller)))
    }

    pub async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteStatus, NavigationError> {
        let origin = GeoPoint::try_from(origin)?;
        let destination = GeoPoint::try_from(destination)?;
        Ok(self.controller.request_route(origin, destination).await.into())
    }

    /// Fails with `InvalidSession` unless a route is being navigated.
    pub async fn update_position(
        &self,
        position: Coordinate,
    ) -> Result<Option<NavigationUpdate>, NavigationError> {
        let position = GeoPoint::try_from(position)?;
        let event = self.controller.on_position_update(position).await?;
        Ok(event.map(Into::into))
    }

    /// Fails with `InvalidSession` when there is nothing to cancel.
    pub async fn cancel(&self) -> Result<(), NavigationError> {
        Ok(self.controller.cancel().await?)
    }

    pub async fn state(&self) -> SessionStatus {
        self.controller.state().await.into()
    }

    pub async fn current_step_index(&self) -> u32 {
        saturating_u32(self.controller.current_step_index().await)
    }

    pub async fn current_step(&self) -> Option<StepInfo> {
        self.controller.current_step().await.map(Into::into)
    }

    pub async fn steps(&self) -> Vec<StepInfo> {
        self.controller
            .route()
            .await
            .map(|route| route.steps().iter().cloned().map(Into::into).collect())
            .unwrap_or_default()
    }

    pub async fn route_polyline(&self) -> Vec<Coordinate> {
        self.controller
            .route()
            .await
            .map(|route| route.polyline().iter().copied().map(Into::into).collect())
            .unwrap_or_default()
    }

    pub async fn progress(
        &self,
        position: Coordinate,
    ) -> Result<Option<ProgressInfo>, NavigationError> {
        let position = GeoPoint::try_from(position)?;
        Ok(self.controller.progress(position).await.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;

    use commonspot_core::navigation::network::{FetchError, RouteFetcher};
    use serde_json::json;

    struct FixedFetcher(Vec<u8>);

    impl RouteFetcher for FixedFetcher {
        fn fetch_route<'a>(
            &'a self,
            _origin: GeoPoint,
            _destination: GeoPoint,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>> {
            Box::pin(async move { Ok(self.0.clone()) })
        }
    }

    fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    fn state() -> NavigationState {
        let body = json!({
            "code": "Ok",
            "routes": [{
                "geometry": { "coordinates": [[18.50, -33.80], [18.50, -33.79]] },
                "duration": 75.9,
                "legs": [{ "steps": [
                    { "distance": 1100.0, "duration": 75.9, "name": "Main Rd",
                      "maneuver": { "location": [18.50, -33.80], "type": "depart" } },
                    { "distance": 0.0, "duration": 0.0, "name": "",
                      "maneuver": { "location": [18.50, -33.79], "type": "arrive" } }
                ]}]
            }]
        });
        let fetcher = Arc::new(FixedFetcher(body.to_string().into_bytes()));
        NavigationState::from_controller(NavigationController::new(
            fetcher,
            NavigationConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_full_session() {
        let state = state();
        assert_eq!(state.state().await, SessionStatus::Idle);

        let status = state
            .request_route(coordinate(-33.80, 18.50), coordinate(-33.79, 18.50))
            .await
            .unwrap();
        assert_eq!(
            status,
            RouteStatus::Started {
                steps: 2,
                total_duration_s: 75
            }
        );
        assert_eq!(state.route_polyline().await.len(), 2);
        assert_eq!(state.steps().await.len(), 2);
        assert_eq!(
            state.current_step().await.unwrap().instruction,
            "Start onto Main Rd"
        );

        let update = state
            .update_position(coordinate(-33.80, 18.50))
            .await
            .unwrap();
        assert_eq!(update, Some(NavigationUpdate::Advanced { step_index: 1 }));
        assert_eq!(state.current_step_index().await, 1);

        let update = state
            .update_position(coordinate(-33.79, 18.50))
            .await
            .unwrap();
        assert_eq!(update, Some(NavigationUpdate::Arrived));
        assert_eq!(state.state().await, SessionStatus::Arrived);

        state.cancel().await.unwrap();
        assert_eq!(state.state().await, SessionStatus::Idle);
        assert!(state.route_polyline().await.is_empty());
        assert!(matches!(
            state.cancel().await,
            Err(NavigationError::InvalidSession(_))
        ));
    }

    #[tokio::test]
    async fn test_update_while_idle_fails() {
        let state = state();
        let result = state.update_position(coordinate(-33.80, 18.50)).await;
        assert!(matches!(result, Err(NavigationError::InvalidSession(_))));
        assert_eq!(state.state().await, SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_rejects_invalid_coordinates() {
        let state = state();
        let result = state
            .request_route(coordinate(95.0, 0.0), coordinate(0.0, 0.0))
            .await;
        assert!(matches!(result, Err(NavigationError::InvalidCoordinate(_))));
        assert_eq!(state.state().await, SessionStatus::Idle);

        assert!(matches!(
            state.update_position(coordinate(0.0, 200.0)).await,
            Err(NavigationError::InvalidCoordinate(_))
        ));
    }
}
