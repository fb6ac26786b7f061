use std::time::Duration;

use serde::{Deserialize, Serialize};

use commonspot_navigation::MANEUVER_THRESHOLD_M;

/// Where and how routes are requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Root of an OSRM-compatible HTTP service, without the `/route/v1` part.
    pub base_url: String,
    pub profile: String,
    pub timeout: Duration,
}

impl RoutingConfig {
    pub const PUBLIC_OSRM_URL: &'static str = "https://router.project-osrm.org";

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: Self::PUBLIC_OSRM_URL.to_owned(),
            profile: "driving".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// A fix closer than this to the upcoming maneuver advances the route.
    pub maneuver_threshold_m: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            maneuver_threshold_m: MANEUVER_THRESHOLD_M,
        }
    }
}
