//! Values that cross the FFI boundary.

use commonspot_core::RouteUpdate;
use commonspot_core::navigation::{
    GeoPoint, NavigationEvent, NavigationStep, Progress, SessionError, TrackerState,
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum NavigationError {
    #[error("{0}")]
    InvalidCoordinate(String),

    #[error("{0}")]
    InvalidSession(String),

    #[error("{0}")]
    Setup(String),
}

impl From<SessionError> for NavigationError {
    fn from(error: SessionError) -> Self {
        NavigationError::InvalidSession(error.to_string())
    }
}

/// Indices and counts cross the FFI as `u32`; larger values saturate.
pub(crate) fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<Coordinate> for GeoPoint {
    type Error = NavigationError;

    fn try_from(value: Coordinate) -> Result<Self, Self::Error> {
        GeoPoint::try_new(value.latitude, value.longitude)
            .map_err(|e| NavigationError::InvalidCoordinate(e.to_string()))
    }
}

impl From<GeoPoint> for Coordinate {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Enum)]
pub enum RouteStatus {
    Started { steps: u32, total_duration_s: u64 },
    NoRouteAvailable,
    Superseded,
}

impl From<RouteUpdate> for RouteStatus {
    fn from(update: RouteUpdate) -> Self {
        match update {
            RouteUpdate::Started {
                steps,
                total_duration_s,
            } => RouteStatus::Started {
                steps: saturating_u32(steps),
                total_duration_s,
            },
            RouteUpdate::NoRouteAvailable => RouteStatus::NoRouteAvailable,
            RouteUpdate::Superseded => RouteStatus::Superseded,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum NavigationUpdate {
    Advanced { step_index: u32 },
    Arrived,
}

impl From<NavigationEvent> for NavigationUpdate {
    fn from(event: NavigationEvent) -> Self {
        match event {
            NavigationEvent::Advanced { step_index } => NavigationUpdate::Advanced {
                step_index: saturating_u32(step_index),
            },
            NavigationEvent::Arrived => NavigationUpdate::Arrived,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum SessionStatus {
    Idle,
    Navigating,
    Arrived,
}

impl From<TrackerState> for SessionStatus {
    fn from(state: TrackerState) -> Self {
        match state {
            TrackerState::Idle => SessionStatus::Idle,
            TrackerState::Navigating => SessionStatus::Navigating,
            TrackerState::Arrived => SessionStatus::Arrived,
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct StepInfo {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub maneuver_type: String,
    pub maneuver_modifier: Option<String>,
    pub road_name: String,
    pub location: Coordinate,
}

impl From<NavigationStep> for StepInfo {
    fn from(step: NavigationStep) -> Self {
        Self {
            instruction: step.instruction,
            distance_m: step.distance_m,
            duration_s: step.duration_s,
            maneuver_type: step.maneuver_type,
            maneuver_modifier: step.maneuver_modifier,
            road_name: step.road_name,
            location: step.maneuver_location.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct ProgressInfo {
    pub step_index: u32,
    pub instruction: String,
    pub distance_to_maneuver_m: f64,
    pub bearing_to_maneuver_deg: f64,
    pub remaining_distance_m: f64,
    pub remaining_duration_s: f64,
}

impl From<Progress> for ProgressInfo {
    fn from(progress: Progress) -> Self {
        Self {
            step_index: saturating_u32(progress.step_index),
            instruction: progress.instruction,
            distance_to_maneuver_m: progress.distance_to_maneuver_m,
            bearing_to_maneuver_deg: progress.bearing_to_maneuver_deg,
            remaining_distance_m: progress.remaining_distance_m,
            remaining_duration_s: progress.remaining_duration_s,
        }
    }
}
