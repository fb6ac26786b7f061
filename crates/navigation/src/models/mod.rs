//! Route data model and error types.

pub mod types;

// Re-exports for convenience
pub use types::{CoordinateError, NavigationStep, ParseError, Result, Route, SessionError};
