//! Async front end for a single navigation session.
//!
//! [`NavigationController`] owns the tracker and is the only place where
//! routing results are applied to it. Every route request and cancellation
//! bumps a generation counter; a fetch that completes after its generation
//! went stale is dropped instead of replacing the newer state.

use std::sync::Arc;

use commonspot_navigation::network::RouteFetcher;
use commonspot_navigation::{
    GeoPoint, NavigationEvent, NavigationStep, NavigationTracker, Progress, Route, SessionError,
    TrackerState,
};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, trace, warn};

use crate::config::{NavigationConfig, RoutingConfig};
use crate::routing::{self, OsrmClient};

/// Result of asking for a new route.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteUpdate {
    /// The route was applied and navigation restarted from its first maneuver.
    Started { steps: usize, total_duration_s: u64 },
    /// Fetching or parsing failed.
    NoRouteAvailable,
    /// A newer request or a cancellation arrived first; the result was discarded.
    Superseded,
}

struct SessionState {
    tracker: NavigationTracker,
    generation: u64,
}

pub struct NavigationController {
    fetcher: Arc<dyn RouteFetcher>,
    state: Mutex<SessionState>,
}

impl NavigationController {
    pub fn new(fetcher: Arc<dyn RouteFetcher>, config: NavigationConfig) -> Self {
        Self {
            fetcher,
            state: Mutex::new(SessionState {
                tracker: NavigationTracker::with_threshold(config.maneuver_threshold_m),
                generation: 0,
            }),
        }
    }

    pub fn with_osrm(
        routing: RoutingConfig,
        navigation: NavigationConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(OsrmClient::new(routing)?), navigation))
    }

    /// Request a route and, if it is still the latest request once it
    /// arrives, start navigating it. The current session ends immediately.
    pub async fn request_route(&self, origin: GeoPoint, destination: GeoPoint) -> RouteUpdate {
        let ticket = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            if state.tracker.reset() {
                debug!("previous session ended by new route request");
            }
            state.generation
        };

        let result = routing::fetch_route(self.fetcher.as_ref(), origin, destination).await;

        let mut state = self.state.lock().await;
        if state.generation != ticket {
            debug!(ticket, latest = state.generation, "discarding stale route result");
            return RouteUpdate::Superseded;
        }

        let route = match result {
            Ok(route) => route,
            Err(error) => {
                warn!(%error, retryable = error.is_retryable(), "no route available");
                return RouteUpdate::NoRouteAvailable;
            }
        };

        let update = RouteUpdate::Started {
            steps: route.steps().len(),
            total_duration_s: route.total_duration_s(),
        };

        match state.tracker.start(route) {
            Ok(()) => update,
            Err(error) => {
                warn!(%error, "route rejected by tracker");
                RouteUpdate::NoRouteAvailable
            }
        }
    }

    /// Stop navigating and discard any route request still in flight.
    ///
    /// A pending request is discarded even when this fails because no
    /// session was active.
    pub async fn cancel(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.tracker.cancel()
    }

    /// Feed a position fix. Fails unless a route is being navigated.
    pub async fn on_position_update(
        &self,
        position: GeoPoint,
    ) -> Result<Option<NavigationEvent>, SessionError> {
        self.state.lock().await.tracker.on_position_update(position)
    }

    /// Drive the session from a stream of fixes until either channel closes.
    pub async fn run(
        &self,
        mut positions: mpsc::Receiver<GeoPoint>,
        events: mpsc::Sender<NavigationEvent>,
    ) {
        while let Some(position) = positions.recv().await {
            let event = match self.on_position_update(position).await {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(error) => {
                    trace!(%position, %error, "fix not applied");
                    continue;
                }
            };

            if events.send(event).await.is_err() {
                debug!("event receiver dropped, stopping");
                return;
            }
        }

        info!("position stream ended");
    }

    pub async fn state(&self) -> TrackerState {
        self.state.lock().await.tracker.state()
    }

    pub async fn current_step_index(&self) -> usize {
        self.state.lock().await.tracker.current_step_index()
    }

    pub async fn current_step(&self) -> Option<NavigationStep> {
        self.state.lock().await.tracker.current_step().cloned()
    }

    pub async fn route(&self) -> Option<Route> {
        self.state.lock().await.tracker.route().cloned()
    }

    pub async fn progress(&self, position: GeoPoint) -> Option<Progress> {
        self.state.lock().await.tracker.progress(position)
    }
}
