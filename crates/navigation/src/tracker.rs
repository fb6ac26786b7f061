//! Turn-by-turn progress tracking.
//!
//! [`NavigationTracker`] is a small synchronous state machine:
//!
//! ```text
//! Idle --start--> Navigating --(last maneuver reached)--> Arrived
//!   ^                 |                                      |
//!   +-----cancel------+-------------------cancel-------------+
//! ```
//!
//! Each position fix is compared against the *current* maneuver only, so a
//! single fix advances at most one step.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::geo_point::GeoPoint;
use crate::models::types::{NavigationStep, Result, Route, SessionError};

/// Proximity radius for considering a maneuver reached.
pub const MANEUVER_THRESHOLD_M: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackerState {
    Idle,
    Navigating,
    Arrived,
}

/// Emitted when a position fix changes the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEvent {
    /// The maneuver before `step_index` was reached; `step_index` is now current.
    Advanced { step_index: usize },
    /// The final maneuver was reached.
    Arrived,
}

/// The active route and how far along it the user is.
#[derive(Clone, Debug)]
pub struct NavigationSession {
    route: Route,
    current_step_index: usize,
}

impl NavigationSession {
    fn new(route: Route) -> Self {
        Self {
            route,
            current_step_index: 0,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> Option<&NavigationStep> {
        self.route.step(self.current_step_index)
    }

    /// `false` once every maneuver has been reached.
    pub fn is_active(&self) -> bool {
        self.current_step_index < self.route.steps().len()
    }
}

/// Where the user stands relative to the upcoming maneuver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub step_index: usize,
    pub instruction: String,
    pub distance_to_maneuver_m: f64,
    pub bearing_to_maneuver_deg: f64,
    pub remaining_distance_m: f64,
    pub remaining_duration_s: f64,
}

#[derive(Debug)]
pub struct NavigationTracker {
    session: Option<NavigationSession>,
    maneuver_threshold_m: f64,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::with_threshold(MANEUVER_THRESHOLD_M)
    }

    pub fn with_threshold(maneuver_threshold_m: f64) -> Self {
        Self {
            session: None,
            maneuver_threshold_m,
        }
    }

    pub fn maneuver_threshold_m(&self) -> f64 {
        self.maneuver_threshold_m
    }

    pub fn state(&self) -> TrackerState {
        match &self.session {
            None => TrackerState::Idle,
            Some(session) if session.is_active() => TrackerState::Navigating,
            Some(_) => TrackerState::Arrived,
        }
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.session.as_ref().map(NavigationSession::route)
    }

    /// Index of the upcoming maneuver; `0` while idle, `steps.len()` once arrived.
    pub fn current_step_index(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, NavigationSession::current_step_index)
    }

    pub fn current_step(&self) -> Option<&NavigationStep> {
        self.session.as_ref().and_then(NavigationSession::current_step)
    }

    /// Begin navigating `route` from its first maneuver.
    ///
    /// Any existing session is replaced wholesale.
    pub fn start(&mut self, route: Route) -> Result<()> {
        if route.steps().is_empty() {
            return Err(SessionError::EmptyRoute);
        }

        if let Some(previous) = self.session.take() {
            debug!(
                step_index = previous.current_step_index,
                "replacing active navigation session"
            );
        }

        info!(
            steps = route.steps().len(),
            duration_s = route.total_duration_s(),
            "navigation started"
        );
        self.session = Some(NavigationSession::new(route));
        Ok(())
    }

    /// Feed a new position fix.
    ///
    /// Returns `Ok(None)` when the fix is not within the maneuver threshold of
    /// the current step. Fails if there is no route being navigated.
    pub fn on_position_update(&mut self, position: GeoPoint) -> Result<Option<NavigationEvent>> {
        let state = self.state();
        let session = match self.session.as_mut() {
            Some(session) if state == TrackerState::Navigating => session,
            _ => {
                return Err(SessionError::InvalidSessionOperation {
                    operation: "update position",
                    state,
                });
            }
        };

        let step_count = session.route.steps().len();
        let maneuver = session.route.steps()[session.current_step_index].maneuver_location;
        let distance_m = position.distance_to(&maneuver);

        if distance_m >= self.maneuver_threshold_m {
            return Ok(None);
        }

        session.current_step_index += 1;

        if session.current_step_index == step_count {
            info!(distance_m, "arrived at destination");
            Ok(Some(NavigationEvent::Arrived))
        } else {
            debug!(
                step_index = session.current_step_index,
                distance_m, "advanced to next maneuver"
            );
            Ok(Some(NavigationEvent::Advanced {
                step_index: session.current_step_index,
            }))
        }
    }

    /// Drop the current route and return to idle.
    pub fn cancel(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => {
                info!(
                    step_index = session.current_step_index,
                    "navigation cancelled"
                );
                Ok(())
            }
            None => Err(SessionError::InvalidSessionOperation {
                operation: "cancel",
                state: TrackerState::Idle,
            }),
        }
    }

    /// Return to idle from any state. Returns `true` if a session was dropped.
    pub fn reset(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                debug!(step_index = session.current_step_index, "navigation reset");
                true
            }
            None => false,
        }
    }

    /// Distance, bearing and remaining totals from `position`; `None` unless navigating.
    pub fn progress(&self, position: GeoPoint) -> Option<Progress> {
        let session = self.session.as_ref()?;
        let step = session.current_step()?;
        let index = session.current_step_index;

        Some(Progress {
            step_index: index,
            instruction: step.instruction.clone(),
            distance_to_maneuver_m: position.distance_to(&step.maneuver_location),
            bearing_to_maneuver_deg: position.bearing_to(&step.maneuver_location),
            remaining_distance_m: session.route.remaining_distance_m(index),
            remaining_duration_s: session.route.remaining_duration_s(index),
        })
    }
}

impl Default for NavigationTracker {
    fn default() -> Self {
        Self::new()
    }
}
