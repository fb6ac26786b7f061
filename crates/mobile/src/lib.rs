pub(crate) mod logging;
pub mod state;
pub mod types;

uniffi::setup_scaffolding!();

/// Install the tracing subscriber and panic hook.
/// Safe to call more than once; constructing a `NavigationState` also does it.
#[uniffi::export]
pub fn init_logging() {
    logging::setup_logging();
}
