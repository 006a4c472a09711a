//! Utility modules for onfs

pub mod errors;
pub mod logger;

// Re-export commonly used items
pub use errors::{OnfsError, display_error_and_exit, enhance_error};
pub use logger::{log_debug, log_error, log_info, log_warn};
