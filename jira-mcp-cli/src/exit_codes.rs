//! Exit code constants for the CLI
//!
//! - 0: Success
//! - 1: Runtime failure
//! - 2: Configuration error

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// The server failed to start or stopped with an error
pub const EXIT_FAILURE: i32 = 1;

/// Missing or invalid configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;
