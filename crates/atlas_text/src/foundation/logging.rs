//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging, ignoring the error if a logger is already installed
///
/// Convenient for tests and for hosts that may have set up their own logger.
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}
