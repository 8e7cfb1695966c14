//! Main application modules.
//!
//! This module provides progress logging, shutdown handling and statistics
//! printing used by the binary.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, spawn_progress_logger};
pub use shutdown::{shutdown_gracefully, spawn_interrupt_handler};
pub use statistics::log_statistics;
