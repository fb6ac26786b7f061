//! # commonspot-navigation
//!
//! Turn-by-turn navigation core, free of any map or UI dependencies.
//!
//! ## Features
//!
//! - **Route parsing**: OSRM-compatible `route` responses into a flat [`Route`]
//! - **Instructions**: readable text for every maneuver
//! - **Progress tracking**: a synchronous state machine fed with position fixes
//! - **Pluggable networking**: implement [`RouteFetcher`] for your HTTP stack
//!
//! ## Example
//!
//! ```
//! use commonspot_navigation::prelude::*;
//!
//! let body = br#"{
//!     "code": "Ok",
//!     "routes": [{
//!         "geometry": { "coordinates": [[18.5189, -33.8041], [18.5000, -33.8666]] },
//!         "duration": 412.7,
//!         "legs": [{ "steps": [
//!             { "distance": 7000.0, "duration": 400.0, "name": "Koeberg Rd",
//!               "maneuver": { "location": [18.5189, -33.8041], "type": "depart" } },
//!             { "distance": 0.0, "duration": 0.0, "name": "",
//!               "maneuver": { "location": [18.5000, -33.8666], "type": "arrive" } }
//!         ]}]
//!     }]
//! }"#;
//!
//! let route = parse_route(body).unwrap();
//! assert_eq!(route.steps()[0].instruction, "Start onto Koeberg Rd");
//!
//! let mut tracker = NavigationTracker::new();
//! tracker.start(route).unwrap();
//!
//! let event = tracker.on_position_update(GeoPoint::new(-33.8041, 18.5189)).unwrap();
//! assert_eq!(event, Some(NavigationEvent::Advanced { step_index: 1 }));
//! ```

pub mod geo_point;
pub mod instruction;
pub mod models;
pub mod network;
pub mod parser;
pub mod tracker;

// Re-exports for convenience
pub mod prelude {
    pub use crate::geo_point::{EARTH_RADIUS_M, GeoPoint};
    pub use crate::instruction::{ManeuverKind, format_instruction};
    pub use crate::models::types::{
        CoordinateError, NavigationStep, ParseError, Route, SessionError,
    };
    pub use crate::network::{FetchError, RouteFetcher, RouteRequest};
    pub use crate::parser::{
        ParseOutcome, StepSkipped, parse_route, parse_route_detailed, parse_route_value,
    };
    pub use crate::tracker::{
        MANEUVER_THRESHOLD_M, NavigationEvent, NavigationSession, NavigationTracker, Progress,
        TrackerState,
    };
}

pub use prelude::*;
