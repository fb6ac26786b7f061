//! Application-side navigation services: routing-service access and the
//! async session controller used by the mobile bindings and tools.

pub mod config;
pub mod routing;
pub mod session;

// Re-export the navigation model for callers that only depend on core
pub use commonspot_navigation as navigation;

pub use config::{NavigationConfig, RoutingConfig};
pub use routing::{OsrmClient, RouteError};
pub use session::{NavigationController, RouteUpdate};
